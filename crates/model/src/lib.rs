pub use serde_with;

pub mod service;
pub mod track;

pub trait ExampleData {
    fn example_data() -> Self;
}
