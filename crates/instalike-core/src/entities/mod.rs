//! Domain entities - core business objects

mod comment;
mod entity;
mod like;
mod notification;
mod post;
mod user;

pub use comment::Comment;
pub(crate) use entity::entity_equality;
pub use entity::{Entity, EntityId, EntityRef, Identity};
pub use like::Like;
pub use notification::Notification;
pub use post::Post;
pub use user::User;
