pub use super::agents::Entity as Agents;
pub use super::events::Entity as Events;
pub use super::faqs::Entity as Faqs;
pub use super::initiatives::Entity as Initiatives;
pub use super::opportunities::Entity as Opportunities;
pub use super::organizations::Entity as Organizations;
pub use super::phases::Entity as Phases;
pub use super::spaces::Entity as Spaces;
