pub mod manager;

pub use manager::PlaylistManager;
