pub mod dfm;

pub use self::dfm::Dfm;
