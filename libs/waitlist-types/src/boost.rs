use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UnknownBoostAction;

/// An engagement task a registrant can complete before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostAction {
    /// Shared the product on Twitter/X.
    Twitter,
    /// Joined the community channel.
    Telegram,
    /// Shared an invite link with friends.
    Invite,
}

impl BoostAction {
    pub const ALL: [BoostAction; 3] = [
        BoostAction::Twitter,
        BoostAction::Telegram,
        BoostAction::Invite,
    ];

    /// Points granted the first time this action is completed.
    pub const fn reward(self) -> u32 {
        match self {
            BoostAction::Twitter => 25,
            BoostAction::Telegram => 15,
            BoostAction::Invite => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoostAction::Twitter => "twitter",
            BoostAction::Telegram => "telegram",
            BoostAction::Invite => "invite",
        }
    }
}

impl fmt::Display for BoostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoostAction {
    type Err = UnknownBoostAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(BoostAction::Twitter),
            // The channel moved from Discord to Telegram; both names are accepted.
            "telegram" | "discord" => Ok(BoostAction::Telegram),
            "invite" | "invite_friends" => Ok(BoostAction::Invite),
            other => Err(UnknownBoostAction(other.to_string())),
        }
    }
}

/// Which boost actions a registrant completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialActions {
    #[serde(default)]
    pub shared_twitter: bool,
    #[serde(default)]
    pub joined_discord: bool,
    #[serde(default)]
    pub invited_friends: bool,
}

impl SocialActions {
    pub fn from_actions<I: IntoIterator<Item = BoostAction>>(actions: I) -> Self {
        let mut out = Self::default();
        for action in actions {
            out.mark(action);
        }
        out
    }

    /// Marks an action as done. Returns `false` if it was already done.
    pub fn mark(&mut self, action: BoostAction) -> bool {
        let flag = self.flag_mut(action);
        let newly_set = !*flag;
        *flag = true;
        newly_set
    }

    pub fn has(&self, action: BoostAction) -> bool {
        match action {
            BoostAction::Twitter => self.shared_twitter,
            BoostAction::Telegram => self.joined_discord,
            BoostAction::Invite => self.invited_friends,
        }
    }

    pub fn completed(&self) -> impl Iterator<Item = BoostAction> + '_ {
        BoostAction::ALL.into_iter().filter(|a| self.has(*a))
    }

    /// Sum of rewards for every completed action.
    pub fn points(&self) -> u32 {
        self.completed().map(BoostAction::reward).sum()
    }

    fn flag_mut(&mut self, action: BoostAction) -> &mut bool {
        match action {
            BoostAction::Twitter => &mut self.shared_twitter,
            BoostAction::Telegram => &mut self.joined_discord,
            BoostAction::Invite => &mut self.invited_friends,
        }
    }
}
