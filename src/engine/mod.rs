pub mod control;
pub mod entity;
pub mod runner;
pub mod sketch;
pub mod timebase;
