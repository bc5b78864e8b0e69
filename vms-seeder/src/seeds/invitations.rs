use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

use vms_types::{
    GroupMember, GroupRef, GroupRole, InvitationStatus, InvitationType, NewInvitation, RowId,
};

use crate::config::SeedPlan;
use crate::db::repositories::{GroupRepository, InvitationRepository, UserRepository};
use crate::seed::{SeedContext, Seeder};

/// Share of invitations still waiting for an answer
const PENDING_RATIO: f64 = 0.7;

pub struct InvitationSeeder;

impl Seeder for InvitationSeeder {
    fn name(&self) -> &'static str {
        "invitations"
    }

    fn seed(&self, ctx: &mut SeedContext<'_>) -> Result<usize> {
        let groups = GroupRepository::new(ctx.conn);
        let group_refs = groups.all_refs()?;
        if group_refs.is_empty() {
            tracing::warn!("No groups found, skipping invitations");
            return Ok(0);
        }
        let user_ids = UserRepository::new(ctx.conn).all_ids()?;

        let mut invitations = Vec::new();
        let mut joined = Vec::new();
        for group in &group_refs {
            let member_ids: Vec<RowId> = groups
                .members_of(group.id)?
                .into_iter()
                .map(|m| m.user_id)
                .collect();

            let picked = plan_invitations(&mut ctx.rng, group, &member_ids, &user_ids, ctx.plan);
            joined.extend(accepted_memberships(&picked));
            invitations.extend(picked);
        }

        let inserted = InvitationRepository::new(ctx.conn).insert_many(&invitations)?;

        // An accepted invitation or request means the user is in the group now
        let added = groups.add_members(&joined)?;
        tracing::debug!("Accepted invitations added {} group members", added);

        Ok(inserted)
    }
}

fn random_status<R: Rng + ?Sized>(rng: &mut R) -> InvitationStatus {
    if rng.random_bool(PENDING_RATIO) {
        InvitationStatus::Pending
    } else if rng.random_bool(0.5) {
        InvitationStatus::Accepted
    } else {
        InvitationStatus::Declined
    }
}

/// Invites from members to non-members, and join requests from non-members to the creator.
///
/// Self-addressed pairs and repeats of an already planned
/// (sender, receiver, type, group) tuple are dropped before a status is drawn,
/// so every planned invitation maps to exactly one stored row.
pub fn plan_invitations<R: Rng + ?Sized>(
    rng: &mut R,
    group: &GroupRef,
    member_ids: &[RowId],
    user_ids: &[RowId],
    plan: &SeedPlan,
) -> Vec<NewInvitation> {
    let members: HashSet<RowId> = member_ids.iter().copied().collect();
    let outsiders: Vec<RowId> = user_ids
        .iter()
        .copied()
        .filter(|id| !members.contains(id))
        .collect();

    let mut planned = HashSet::new();
    let mut invitations = Vec::new();
    let mut push = |rng: &mut R, sender_id: RowId, receiver_id: RowId, kind: InvitationType| {
        let invitation = NewInvitation {
            sender_id,
            receiver_id,
            kind,
            reference_id: group.id,
            status: InvitationStatus::Pending,
        };
        if invitation.is_self_addressed() || !planned.insert((sender_id, receiver_id, kind)) {
            return;
        }
        invitations.push(NewInvitation {
            status: random_status(rng),
            ..invitation
        });
    };

    let invites = rng.random_range(plan.invites_per_group.min..=plan.invites_per_group.max);
    for _ in 0..invites {
        let (Some(&sender_id), Some(&receiver_id)) =
            (member_ids.choose(rng), outsiders.choose(rng))
        else {
            break;
        };
        push(rng, sender_id, receiver_id, InvitationType::GroupInvite);
    }

    let requests =
        rng.random_range(plan.join_requests_per_group.min..=plan.join_requests_per_group.max);
    for _ in 0..requests {
        let Some(&sender_id) = outsiders.choose(rng) else {
            break;
        };
        push(
            rng,
            sender_id,
            group.created_by_user_id,
            InvitationType::JoinRequest,
        );
    }

    invitations
}

/// Memberships implied by accepted invitations and join requests
pub fn accepted_memberships(invitations: &[NewInvitation]) -> Vec<GroupMember> {
    invitations
        .iter()
        .filter(|i| i.status == InvitationStatus::Accepted)
        .map(|i| GroupMember {
            group_id: i.reference_id,
            user_id: match i.kind {
                InvitationType::GroupInvite => i.receiver_id,
                InvitationType::JoinRequest => i.sender_id,
            },
            role: GroupRole::Member,
        })
        .collect()
}
