#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod app;
