// src/common/capabilities.rs

use uuid::Uuid;

use crate::{common::error::AppError, models::user::Role};

/// Ações protegidas. Substitui as comparações de papel espalhadas pelas telas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageSchedule,
    ManageAnnouncements,
    ManageStore,
    ManageTatame,
    ReviewBookings,
    ManagePromotions,
    ManageSettings,
    ViewFinance,
    ManageFinance,
    ManageUsers,
    AssignRoles,
}

impl Capability {
    pub fn slug(self) -> &'static str {
        match self {
            Capability::ManageSchedule => "schedule:write",
            Capability::ManageAnnouncements => "announcements:write",
            Capability::ManageStore => "store:write",
            Capability::ManageTatame => "tatame:write",
            Capability::ReviewBookings => "bookings:review",
            Capability::ManagePromotions => "promotions:write",
            Capability::ManageSettings => "settings:write",
            Capability::ViewFinance => "finance:read",
            Capability::ManageFinance => "finance:write",
            Capability::ManageUsers => "users:write",
            Capability::AssignRoles => "users:roles",
        }
    }
}

const STAFF: &[Capability] = &[
    Capability::ManageSchedule,
    Capability::ManageAnnouncements,
    Capability::ManageStore,
    Capability::ManageTatame,
    Capability::ReviewBookings,
    Capability::ManagePromotions,
    Capability::ViewFinance,
    Capability::ManageFinance,
    Capability::ManageUsers,
];

const ADMIN: &[Capability] = &[
    Capability::ManageSchedule,
    Capability::ManageAnnouncements,
    Capability::ManageStore,
    Capability::ManageTatame,
    Capability::ReviewBookings,
    Capability::ManagePromotions,
    Capability::ViewFinance,
    Capability::ManageFinance,
    Capability::ManageUsers,
    Capability::ManageSettings,
    Capability::AssignRoles,
];

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN,
            Role::Mestre => STAFF,
            Role::User => &[],
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Quem está executando um comando.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            tracing::warn!(
                actor = %self.id,
                permission = capability.slug(),
                "Ação negada por falta de permissão"
            );
            Err(AppError::Forbidden(capability.slug()))
        }
    }
}
