mod user_repository;
mod event_repository;
mod follow_repository;
mod group_repository;
mod invitation_repository;
mod maintenance_repository;

pub use user_repository::UserRepository;
pub use event_repository::EventRepository;
pub use follow_repository::FollowRepository;
pub use group_repository::GroupRepository;
pub use invitation_repository::InvitationRepository;
pub use maintenance_repository::{DatabaseHealth, ForeignKeyViolation, MaintenanceRepository};
