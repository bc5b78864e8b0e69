pub mod users;
pub mod events;
pub mod registrations;
pub mod follows;
pub mod skills;
pub mod groups;
pub mod invitations;

use crate::seed::Seeder;

pub use events::EventSeeder;
pub use follows::FollowSeeder;
pub use groups::{GroupMemberSeeder, GroupSeeder};
pub use invitations::InvitationSeeder;
pub use registrations::RegistrationSeeder;
pub use skills::SkillSeeder;
pub use users::UserSeeder;

/// Every seeder in foreign-key order: parents before the rows that point at them
pub fn default_seeders() -> Vec<Box<dyn Seeder>> {
    vec![
        Box::new(UserSeeder),
        Box::new(EventSeeder),
        Box::new(RegistrationSeeder),
        Box::new(FollowSeeder),
        Box::new(SkillSeeder),
        Box::new(GroupSeeder),
        Box::new(GroupMemberSeeder),
        Box::new(InvitationSeeder),
    ]
}
