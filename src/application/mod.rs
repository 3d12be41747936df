pub mod controller;
mod controller_tests;
