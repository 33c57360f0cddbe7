// Utility module - fixture data shared by the demo binary, integration
// tests and benches

pub mod fixtures;
