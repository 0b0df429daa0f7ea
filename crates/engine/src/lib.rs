pub mod cell;
pub mod cell_ref;
pub mod events;
pub mod history;
pub mod mask;
pub mod sheet;
