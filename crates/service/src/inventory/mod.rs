//! Inventory module: domain records, the store contract with its SeaORM and
//! in-memory implementations, and the brand/category/item services.

pub mod domain;
pub mod validation;
pub mod view;
pub mod repository;
pub mod repo;
pub mod brand_service;
pub mod category_service;
pub mod item_service;

pub use brand_service::BrandService;
pub use category_service::CategoryService;
pub use item_service::ItemService;
pub use domain::{Brand, BrandInput, Category, CategoryField, CategoryInput, CountField, ItemDetail, ItemForm, ItemListing, ItemRecord, NewItem};
pub use repository::{mock, InventoryRepository};
pub use repo::SeaOrmInventoryRepository;
pub use view::{reconcile_selections, CategoryChoice, DeleteGuard, GuardTarget, ItemDraft, ItemFormState};
