pub mod db;
pub mod errors;
pub mod gapminder;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
