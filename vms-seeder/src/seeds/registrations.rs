use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;

use vms_types::{RowId, UserRole};

use crate::config::CountRange;
use crate::db::repositories::{EventRepository, UserRepository};
use crate::seed::{SeedContext, Seeder};

pub struct RegistrationSeeder;

impl Seeder for RegistrationSeeder {
    fn name(&self) -> &'static str {
        "registrations"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let volunteer_ids = UserRepository::new(ctx.conn).ids_by_role(UserRole::Volunteer)?;
        let events = EventRepository::new(ctx.conn);
        let event_ids = events.all_ids()?;

        if volunteer_ids.is_empty() || event_ids.is_empty() {
            tracing::warn!("No volunteers or events, skipping registrations");
            return Ok(0);
        }

        let registrations = pick_registrations(
            &mut ctx.rng,
            &volunteer_ids,
            &event_ids,
            ctx.plan.registrations_per_volunteer,
        );
        events.register_many(&registrations)
    }
}

/// Each volunteer signs up for a uniform number of distinct events in `per_volunteer`
pub fn pick_registrations<R: Rng + ?Sized>(
    rng: &mut R,
    volunteer_ids: &[RowId],
    event_ids: &[RowId],
    per_volunteer: CountRange,
) -> Vec<(RowId, RowId)> {
    let mut registrations = Vec::new();
    for &volunteer_id in volunteer_ids {
        let count = rng.random_range(per_volunteer.min..=per_volunteer.max);
        registrations.extend(
            event_ids
                .choose_multiple(rng, count)
                .map(|&event_id| (volunteer_id, event_id)),
        );
    }
    registrations
}
