//! Default single-port routers.

pub mod side;
pub mod waypoint;

pub use side::SideJogRouter;
pub use waypoint::ManhattanRouter;
