// Adapters layer: concrete implementations of the domain ports (http sources, storage, report sinks).

pub mod headhunter;
pub mod http;
pub mod report;
pub mod storage;
pub mod superjob;
