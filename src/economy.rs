//! Coins, equipment and the blacksmith's shop.
//!
//! A [`Purse`] only changes through kill rewards ([`Purse::credit`]) and
//! [`purchase`]. A purchase validates every precondition before touching
//! the purse, so coins are never debited without the item being granted.

use std::fmt;

use glam::Vec2;
use hashbrown::HashSet;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::PurchaseError;
use crate::vendor::Vendor;
use crate::{ARMOR_PRICE, SWORD_PRICE};

/// Equipment slots the player can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    /// Extends melee reach.
    Weapon,
    /// Cosmetic protection.
    Armor,
}

/// Items sold by the blacksmith.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Grants [`Equipment::Weapon`].
    Sword,
    /// Grants [`Equipment::Armor`].
    Armor,
}

impl ItemKind {
    /// Equipment slot this item fills.
    #[must_use]
    pub const fn equipment(self) -> Equipment {
        match self {
            Self::Sword => Equipment::Weapon,
            Self::Armor => Equipment::Armor,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sword => "sword",
            Self::Armor => "armor",
        })
    }
}

/// Shop prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceList {
    /// Price of the sword.
    pub sword: u32,
    /// Price of the armor.
    pub armor: u32,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            sword: SWORD_PRICE,
            armor: ARMOR_PRICE,
        }
    }
}

impl PriceList {
    /// Price of `item`.
    #[must_use]
    pub const fn cost(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Sword => self.sword,
            ItemKind::Armor => self.armor,
        }
    }
}

/// Coins and owned equipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Purse {
    coins: u32,
    equipment: HashSet<Equipment>,
}

impl Purse {
    /// A purse holding `coins` and no equipment.
    #[must_use]
    pub fn new(coins: u32) -> Self {
        Self {
            coins,
            equipment: HashSet::new(),
        }
    }

    /// Current balance.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Whether `equipment` is owned.
    #[must_use]
    pub fn owns(&self, equipment: Equipment) -> bool {
        self.equipment.contains(&equipment)
    }

    /// Adds `amount` coins, saturating at the maximum balance.
    pub const fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Grants `equipment` without charging for it.
    pub fn grant(&mut self, equipment: Equipment) {
        self.equipment.insert(equipment);
    }
}

/// A priced request, consumed by [`purchase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// Item requested.
    pub item: ItemKind,
    /// Price charged.
    pub cost: u32,
}

/// Proof of a completed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Item bought.
    pub item: ItemKind,
    /// Price paid.
    pub cost: u32,
    /// Coins left afterwards.
    pub remaining: u32,
}

/// Player-facing outcome of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notification {
    /// The item was bought.
    Purchased(Receipt),
    /// The player could not afford the item.
    InsufficientFunds {
        /// Item requested.
        item: ItemKind,
        /// Its price.
        cost: u32,
        /// Coins held.
        available: u32,
    },
    /// The item was already owned.
    AlreadyOwned(ItemKind),
    /// The shop was not reachable or not open.
    VendorUnavailable,
}

impl Notification {
    /// Notification describing a purchase result.
    #[must_use]
    pub const fn from_outcome(outcome: &Result<Receipt, PurchaseError>) -> Self {
        match *outcome {
            Ok(receipt) => Self::Purchased(receipt),
            Err(PurchaseError::InsufficientFunds {
                item,
                cost,
                available,
            }) => Self::InsufficientFunds {
                item,
                cost,
                available,
            },
            Err(PurchaseError::AlreadyOwned(item)) => Self::AlreadyOwned(item),
            Err(PurchaseError::OutOfRange | PurchaseError::DialogueClosed) => Self::VendorUnavailable,
        }
    }

    /// Whether the notification reports a failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::Purchased(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purchased(receipt) => write!(f, "you bought the {}", receipt.item),
            Self::InsufficientFunds { .. } => f.write_str("insufficient funds"),
            Self::AlreadyOwned(item) => write!(f, "you already own the {item}"),
            Self::VendorUnavailable => f.write_str("the blacksmith is not listening"),
        }
    }
}

/// Buys `item` from `vendor` for the player standing at `player_position`.
///
/// Preconditions, checked in order: the player is within the vendor's
/// interaction radius, the dialogue is open, the item is not already owned,
/// and the purse holds at least the item's price. Nothing changes unless
/// all of them hold; on success the price is debited and the equipment
/// granted together.
///
/// # Errors
///
/// Returns the first failed precondition as a [`PurchaseError`].
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use wildlands::config::VendorConfig;
/// use wildlands::economy::{purchase, Equipment, ItemKind, PriceList, Purse};
/// use wildlands::vendor::Vendor;
///
/// let mut vendor = Vendor::new(Vec2::ZERO, &VendorConfig::default());
/// vendor.update_dialogue(Vec2::ZERO, true, false, 0.0);
/// let mut purse = Purse::new(60);
/// let receipt = purchase(&mut purse, &vendor, Vec2::ZERO, &PriceList::default(), ItemKind::Sword).unwrap();
/// assert_eq!(receipt.remaining, 10);
/// assert!(purse.owns(Equipment::Weapon));
/// ```
pub fn purchase(
    purse: &mut Purse,
    vendor: &Vendor,
    player_position: Vec2,
    prices: &PriceList,
    item: ItemKind,
) -> Result<Receipt, PurchaseError> {
    if !vendor.in_reach(player_position) {
        return Err(PurchaseError::OutOfRange);
    }
    if !vendor.dialogue_open {
        return Err(PurchaseError::DialogueClosed);
    }
    let transaction = Transaction {
        item,
        cost: prices.cost(item),
    };
    commit(purse, transaction)
}

fn commit(purse: &mut Purse, transaction: Transaction) -> Result<Receipt, PurchaseError> {
    let Transaction { item, cost } = transaction;
    let equipment = item.equipment();
    if purse.owns(equipment) {
        return Err(PurchaseError::AlreadyOwned(item));
    }
    let Some(remaining) = purse.coins.checked_sub(cost) else {
        return Err(PurchaseError::InsufficientFunds {
            item,
            cost,
            available: purse.coins,
        });
    };
    purse.coins = remaining;
    purse.equipment.insert(equipment);
    info!("purchased {item} for {cost}, {remaining} coins left");
    Ok(Receipt {
        item,
        cost,
        remaining,
    })
}
