pub mod errors;
pub mod db;
pub mod brand;
pub mod category;
pub mod item;
pub mod item_category;

#[cfg(test)]
mod tests;
