/// Things a panel user may do. Collaborators get a fixed subset; admins get all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewDashboard,
    ViewSites,
    ManageSites,
    ViewLeads,
    ManageLeads,
    ViewTasks,
    ManageTasks,
    ManageFinancial,
    ManageSeo,
    ManageAutomation,
    ManageIntegrations,
    ViewActivity,
}

impl Permission {
    /// Everything a collaborator is allowed to do.
    pub const COLLABORATOR: &'static [Permission] = &[
        Permission::ViewDashboard,
        Permission::ViewSites,
        Permission::ViewLeads,
        Permission::ManageLeads,
        Permission::ViewTasks,
        Permission::ManageTasks,
    ];

    pub fn requires_admin(&self) -> bool {
        !Self::COLLABORATOR.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewSites => "view_sites",
            Permission::ManageSites => "manage_sites",
            Permission::ViewLeads => "view_leads",
            Permission::ManageLeads => "manage_leads",
            Permission::ViewTasks => "view_tasks",
            Permission::ManageTasks => "manage_tasks",
            Permission::ManageFinancial => "manage_financial",
            Permission::ManageSeo => "manage_seo",
            Permission::ManageAutomation => "manage_automation",
            Permission::ManageIntegrations => "manage_integrations",
            Permission::ViewActivity => "view_activity",
        }
    }
}
