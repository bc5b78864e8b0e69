use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;

use vms_types::RowId;

use crate::config::CountRange;
use crate::db::repositories::{FollowRepository, UserRepository};
use crate::seed::{SeedContext, Seeder};

pub struct FollowSeeder;

impl Seeder for FollowSeeder {
    fn name(&self) -> &'static str {
        "follows"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let user_ids = UserRepository::new(ctx.conn).all_ids()?;
        if user_ids.len() < 2 {
            tracing::warn!("Not enough users to create follows");
            return Ok(0);
        }

        let edges = pick_follows(&mut ctx.rng, &user_ids, ctx.plan.follows_per_user);
        FollowRepository::new(ctx.conn).follow_many(&edges)
    }
}

/// One-directional `(follower, following)` edges; nobody follows themselves
pub fn pick_follows<R: Rng + ?Sized>(
    rng: &mut R,
    user_ids: &[RowId],
    per_user: CountRange,
) -> Vec<(RowId, RowId)> {
    let mut edges = Vec::new();
    for &follower_id in user_ids {
        let candidates: Vec<RowId> = user_ids
            .iter()
            .copied()
            .filter(|&id| id != follower_id)
            .collect();
        let count = rng.random_range(per_user.min..=per_user.max);
        edges.extend(
            candidates
                .choose_multiple(rng, count)
                .map(|&following_id| (follower_id, following_id)),
        );
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_no_self_follows_and_bounded_out_degree() {
        let mut rng = StdRng::seed_from_u64(4);
        let users: Vec<RowId> = (1..=30).collect();

        let edges = pick_follows(&mut rng, &users, CountRange::new(0, 5));

        assert!(edges.iter().all(|(a, b)| a != b));
        let unique: HashSet<_> = edges.iter().collect();
        assert_eq!(unique.len(), edges.len());
        for user in &users {
            assert!(edges.iter().filter(|(a, _)| a == user).count() <= 5);
        }
    }

    #[test]
    fn test_two_users_can_only_follow_each_other() {
        let mut rng = StdRng::seed_from_u64(4);
        let edges = pick_follows(&mut rng, &[1, 2], CountRange::new(3, 3));
        assert_eq!(edges, vec![(1, 2), (2, 1)]);
    }
}
