mod core;
mod gemv;
