//! Shop admin command handlers.

use std::sync::Arc;

use secrecy::SecretString;
use shopdesk_core::{
    Admin, AdminStats, Command as CoreCommand, CommandResult, CreateAdminRequest, Route,
    UpdateAdminRequest,
};
use tabled::Tabled;

use crate::cli::{AdminsArgs, AdminsCommand, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AdminRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Shop")]
    shop: String,
}

impl From<&Admin> for AdminRow {
    fn from(a: &Admin) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            email: a.email.clone(),
            role: output::or_dash(a.role.as_ref()),
            shop: output::or_dash(
                a.shop
                    .as_ref()
                    .filter(|_| a.is_assigned())
                    .and_then(|s| s.shop_name.as_deref()),
            ),
        }
    }
}

fn stats_detail(s: &Arc<AdminStats>) -> Vec<(&'static str, String)> {
    vec![
        ("Shops", s.total_shops.to_string()),
        ("Shop admins", s.total_shop_admins.to_string()),
        ("Employees", s.total_employees.to_string()),
        ("Rotas this week", s.rotas_this_week.to_string()),
        ("Punches today", s.punches_today.to_string()),
        ("Salaries generated", s.salaries_generated.to_string()),
    ]
}

fn prompt_new_password() -> Result<SecretString, CliError> {
    let first = rpassword::prompt_password("New password: ").map_err(util::prompt_err)?;
    if first.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    let again = rpassword::prompt_password("Repeat password: ").map_err(util::prompt_err)?;
    if first != again {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }
    Ok(SecretString::from(first))
}

pub async fn handle(ctx: &Context, args: AdminsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let controller = &ctx.controller;

    match args.command {
        AdminsCommand::List => {
            util::authorize(ctx, Route::AdminAdmins)?;
            let result = controller.execute(CoreCommand::ListAdmins).await?;
            let CommandResult::Admins(admins) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(
                global.output,
                &admins,
                |a| AdminRow::from(a.as_ref()),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminsCommand::Create { name, email, role } => {
            util::authorize(ctx, Route::AdminCreateAdmin)?;
            let request = CreateAdminRequest {
                name,
                email,
                password: prompt_new_password()?,
                role,
            };
            let result = controller.execute(CoreCommand::CreateAdmin(request)).await?;
            let CommandResult::Admin(admin) = result else {
                return Err(util::unexpected(&result));
            };
            output::print_output(&admin.id.to_string(), global.quiet);
            Ok(())
        }

        AdminsCommand::Update {
            id,
            name,
            email,
            password,
        } => {
            util::authorize(ctx, Route::AdminAdmins)?;
            let update = UpdateAdminRequest {
                name,
                email,
                password: if password {
                    Some(prompt_new_password()?)
                } else {
                    None
                },
            };
            controller
                .execute(CoreCommand::UpdateAdmin {
                    id: util::id(&id),
                    update,
                })
                .await?;
            Ok(())
        }

        AdminsCommand::Delete { id } => {
            util::authorize(ctx, Route::AdminAdmins)?;
            if !util::confirm(&format!("Delete shop admin '{id}'?"), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteAdmin { id: util::id(&id) })
                .await?;
            Ok(())
        }

        AdminsCommand::Unassigned => {
            util::authorize(ctx, Route::AdminCreateShop)?;
            let result = controller
                .execute(CoreCommand::FetchUnassignedAdmins)
                .await?;
            let CommandResult::UnassignedAdmins(admins) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_list(global.output, admins.as_slice(), |x| AdminRow::from(x), |a| {
                a.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminsCommand::Stats => {
            util::authorize(ctx, Route::AdminDashboard)?;
            let result = controller.execute(CoreCommand::FetchAdminStats).await?;
            let CommandResult::AdminStats(stats) = result else {
                return Err(util::unexpected(&result));
            };
            let out = output::render_single(global.output, &stats, stats_detail, |s| {
                s.total_shops.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
