pub mod seaorm;

pub use seaorm::SeaOrmInventoryRepository;
