use anyhow::Result;
use rand::Rng;
use std::collections::HashSet;
use std::iter;

use vms_types::{NewUser, UserRole};

use crate::config::SeedPlan;
use crate::db::repositories::UserRepository;
use crate::fakes;
use crate::password::PasswordHasher;
use crate::seed::{SeedContext, Seeder};

pub struct UserSeeder;

impl Seeder for UserSeeder {
    fn name(&self) -> &'static str {
        "users"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        tracing::info!(
            "Creating {} volunteers and {} organizers",
            ctx.plan.volunteers,
            ctx.plan.organizers
        );
        let users = generate_users(&mut ctx.rng, ctx.plan, &ctx.hasher)?;
        UserRepository::new(ctx.conn).insert_many(&users)
    }
}

/// Volunteers first, then organizers, each with a freshly salted hash of the shared password
pub fn generate_users<R: Rng + ?Sized>(
    rng: &mut R,
    plan: &SeedPlan,
    hasher: &PasswordHasher,
) -> Result<Vec<NewUser>> {
    let roles = iter::repeat(UserRole::Volunteer)
        .take(plan.volunteers)
        .chain(iter::repeat(UserRole::Organizer).take(plan.organizers));

    let mut taken = HashSet::with_capacity(plan.total_users());
    let mut users = Vec::with_capacity(plan.total_users());
    for role in roles {
        let name = fakes::full_name(rng);
        let email = fakes::unique_email(rng, &mut taken);
        users.push(NewUser {
            profile_image_url: Some(fakes::avatar_url(&name)),
            password_hash: hasher.hash(&plan.default_password)?,
            name,
            email,
            role,
        });
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_users_by_role() {
        let plan = SeedPlan {
            volunteers: 4,
            organizers: 2,
            ..SeedPlan::default()
        };
        let hasher = PasswordHasher::fast();
        let mut rng = StdRng::seed_from_u64(1);

        let users = generate_users(&mut rng, &plan, &hasher).unwrap();

        assert_eq!(users.len(), 6);
        assert!(users[..4].iter().all(|u| u.role == UserRole::Volunteer));
        assert!(users[4..].iter().all(|u| u.role == UserRole::Organizer));

        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), 6, "emails must be unique");

        for user in &users {
            assert!(bcrypt::verify("pass123", &user.password_hash).unwrap());
            assert!(user
                .profile_image_url
                .as_deref()
                .is_some_and(|url| url.starts_with("https://placehold.co/100x100/")));
        }
    }
}
