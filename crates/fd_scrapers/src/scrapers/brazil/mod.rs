pub mod folha;

pub use folha::FolhaScraper;
