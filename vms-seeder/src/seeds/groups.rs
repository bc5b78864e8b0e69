use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;

use vms_types::{GroupMember, GroupRef, GroupRole, NewGroup, RowId};

use crate::config::CountRange;
use crate::db::repositories::{GroupRepository, UserRepository};
use crate::fakes;
use crate::seed::{SeedContext, Seeder};

pub struct GroupSeeder;

impl Seeder for GroupSeeder {
    fn name(&self) -> &'static str {
        "groups"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let user_ids = UserRepository::new(ctx.conn).all_ids()?;
        if user_ids.is_empty() {
            tracing::warn!("No users found, skipping groups");
            return Ok(0);
        }

        tracing::info!("Creating {} groups", ctx.plan.groups);
        let groups = generate_groups(&mut ctx.rng, ctx.plan.groups, &user_ids);
        GroupRepository::new(ctx.conn).insert_many(&groups)
    }
}

pub fn generate_groups<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    user_ids: &[RowId],
) -> Vec<NewGroup> {
    let mut groups = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&created_by_user_id) = user_ids.choose(rng) else {
            break;
        };
        let name = fakes::group_name(rng);
        groups.push(NewGroup {
            description: Some(fakes::group_description(rng)),
            image_url: Some(fakes::group_banner_url(&name)),
            name,
            created_by_user_id,
        });
    }
    groups
}

pub struct GroupMemberSeeder;

impl Seeder for GroupMemberSeeder {
    fn name(&self) -> &'static str {
        "group_members"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let groups = GroupRepository::new(ctx.conn);
        let group_refs = groups.all_refs()?;
        if group_refs.is_empty() {
            tracing::warn!("No groups found, skipping memberships");
            return Ok(0);
        }
        let user_ids = UserRepository::new(ctx.conn).all_ids()?;

        let mut members = Vec::new();
        for group in &group_refs {
            members.extend(pick_members(
                &mut ctx.rng,
                group,
                &user_ids,
                ctx.plan.extra_members_per_group,
            ));
        }
        groups.add_members(&members)
    }
}

/// The creator as admin, then a random sample of other users as members
pub fn pick_members<R: Rng + ?Sized>(
    rng: &mut R,
    group: &GroupRef,
    user_ids: &[RowId],
    extra: CountRange,
) -> Vec<GroupMember> {
    let mut members = vec![GroupMember {
        group_id: group.id,
        user_id: group.created_by_user_id,
        role: GroupRole::Admin,
    }];

    let candidates: Vec<RowId> = user_ids
        .iter()
        .copied()
        .filter(|&id| id != group.created_by_user_id)
        .collect();
    let count = rng.random_range(extra.min..=extra.max);
    members.extend(
        candidates
            .choose_multiple(rng, count)
            .map(|&user_id| GroupMember {
                group_id: group.id,
                user_id,
                role: GroupRole::Member,
            }),
    );
    members
}
