use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;

use vms_types::UserRole;

use crate::config::CountRange;
use crate::db::repositories::UserRepository;
use crate::seed::{SeedContext, Seeder};

/// Skill vocabulary the backend's profile page offers
pub const SKILL_LIST: [&str; 12] = [
    "First Aid",
    "Graphic Design",
    "Public Speaking",
    "Data Entry",
    "Event Planning",
    "Fundraising",
    "Social Media",
    "Driving",
    "Cooking",
    "Teaching",
    "Manual Labor",
    "Photography",
];

pub struct SkillSeeder;

impl Seeder for SkillSeeder {
    fn name(&self) -> &'static str {
        "user_skills"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let users = UserRepository::new(ctx.conn);
        let volunteer_ids = users.ids_by_role(UserRole::Volunteer)?;
        if volunteer_ids.is_empty() {
            tracing::warn!("No volunteers found to assign skills");
            return Ok(0);
        }

        let mut inserted = 0;
        for volunteer_id in volunteer_ids {
            let skills = pick_skills(&mut ctx.rng, ctx.plan.skills_per_volunteer);
            inserted += users.add_skills(volunteer_id, &skills)?;
        }
        Ok(inserted)
    }
}

/// Distinct skills, as many as a uniform draw from `range` (capped at the vocabulary size)
pub fn pick_skills<R: Rng + ?Sized>(rng: &mut R, range: CountRange) -> Vec<&'static str> {
    let count = rng.random_range(range.min..=range.max);
    SKILL_LIST.choose_multiple(rng, count).copied().collect()
}
