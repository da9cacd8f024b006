mod request_gate;

pub use request_gate::request_gate;
