#![allow(dead_code)]

pub mod offline_support;
