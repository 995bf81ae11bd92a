pub mod analyst_factory;

pub use analyst_factory::AnalystFactory;
