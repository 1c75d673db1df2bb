pub mod test_classify;
pub mod test_properties;
