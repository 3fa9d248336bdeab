//! Clan membership. Every change is written to the store immediately.

use tracing::info;

use super::{write_back, EntityStore, PoolError};
use crate::models::{Clan, ClanId, ClanMember, Player, PlayerId};
use crate::query::PlayerFilter;
use crate::storage::DocumentStore;

impl<S: DocumentStore> EntityStore<S> {
    fn clan_entry(&mut self, clan_id: &ClanId) -> Result<(&S, &mut Clan), PoolError> {
        let clan = self
            .clans
            .get_or_load_mut(&self.store)?
            .iter_mut()
            .find(|clan| &clan.id == clan_id)
            .ok_or_else(|| PoolError::ClanNotFound(clan_id.clone()))?;
        Ok((&self.store, clan))
    }

    /// Players listed in a clan, in membership order.
    pub fn clan_members(&self, clan: &Clan) -> Result<Vec<&Player>, PoolError> {
        let mut members = Vec::with_capacity(clan.member_ids.len());
        for member in &clan.member_ids {
            let player = self
                .find_players(&PlayerFilter::new().with_player_id(member.member_id.clone()))?
                .into_iter()
                .next()
                .ok_or_else(|| PoolError::PlayerNotFound(member.member_id.to_string()))?;
            members.push(player);
        }
        Ok(members)
    }

    /// Add the player with a chat id to a clan.
    ///
    /// Returns the added player, or None when no player has that chat id or
    /// the player is already a member.
    pub fn add_clan_member(
        &mut self,
        clan_id: &ClanId,
        discord_id: u64,
    ) -> Result<Option<&Player>, PoolError> {
        let Some(player_id) = self
            .find_players(&PlayerFilter::new().with_discord_id(discord_id))?
            .first()
            .map(|player| player.id.clone())
        else {
            return Ok(None);
        };

        let (store, clan) = self.clan_entry(clan_id)?;
        if clan.has_member(&player_id) {
            return Ok(None);
        }
        clan.member_ids.push(ClanMember {
            member_id: player_id.clone(),
        });
        write_back(store, &*clan)?;
        info!("Added {} to clan {}", player_id, clan.clan_name);

        Ok(self
            .find_players(&PlayerFilter::new().with_player_id(player_id))?
            .into_iter()
            .next())
    }

    /// Remove a player from a clan. Returns whether they were a member.
    pub fn remove_clan_member(
        &mut self,
        clan_id: &ClanId,
        player_id: &PlayerId,
    ) -> Result<bool, PoolError> {
        let (store, clan) = self.clan_entry(clan_id)?;
        if !clan.has_member(player_id) {
            return Ok(false);
        }
        clan.member_ids.retain(|member| &member.member_id != player_id);
        write_back(store, &*clan)?;
        info!("Removed {} from clan {}", player_id, clan.clan_name);
        Ok(true)
    }

    pub fn delete_all_clan_members(&mut self, clan_id: &ClanId) -> Result<(), PoolError> {
        let (store, clan) = self.clan_entry(clan_id)?;
        clan.member_ids.clear();
        write_back(store, &*clan)?;
        info!("Cleared members of clan {}", clan.clan_name);
        Ok(())
    }
}
