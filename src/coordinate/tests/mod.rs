mod transform_tests;
mod window_tests;
