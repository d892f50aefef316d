pub mod error;
pub mod model;
pub mod sim;

#[cfg(test)]
mod test;
