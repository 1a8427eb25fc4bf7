//! Types shared between the Java and native sides of a conversion.

pub mod abs;
pub mod prm;
pub mod vectors;
