mod appointment_test;
mod config_test;
mod doctor_test;
mod middleware_test;
mod test_utils;
