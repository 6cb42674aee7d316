mod scenario_tests;
mod utils;
