pub mod compare;
pub mod home;
pub mod select;

pub use compare::ComparePage;
pub use home::HomePage;
pub use select::SelectPage;
