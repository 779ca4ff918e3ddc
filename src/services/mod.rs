pub mod controller;
pub mod gemini;
pub mod history;
pub mod storage;
