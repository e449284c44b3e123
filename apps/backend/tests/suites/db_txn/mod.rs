pub mod items_repo;
