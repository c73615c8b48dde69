pub mod alloy_tools;
