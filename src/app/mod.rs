// Application layer - Use case interactors

pub mod batch_controller;
pub mod container;
pub mod edit_interactor;
pub mod export_interactor;
pub mod inspect_interactor;

// Re-export interactors
pub use batch_controller::{BatchController, BatchHandle, BatchRunner};
pub use edit_interactor::EditInteractor;
pub use export_interactor::ExportInteractor;
pub use inspect_interactor::InspectInteractor;
