mod actuator;
mod reader;

pub use actuator::AppCommandActuator;
pub use reader::EndpointReader;
