use super::open_session;
use crate::cli::parser::{Cli, Commands, UserAction};
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::db::log::ttlog;
use crate::db::users::{insert_user, list_users, rotate_token};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    match action {
        UserAction::Add { name } => {
            let pool = open_ready(&cfg.database)?;
            let user = insert_user(&pool.conn, name)?;
            ttlog(
                &pool.conn,
                "user_add",
                &format!("user#{}", user.id),
                &format!("Created user '{}'", user.name),
            )?;
            success(format!("User '{}' created (id {})", user.name, user.id));
            println!("🔑 Token : {}", user.token);
        }

        UserAction::List => {
            let pool = open_ready(&cfg.database)?;
            let users = list_users(&pool.conn)?;
            if users.is_empty() {
                info("No users yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Name", 20),
                Column::new("Created", 25),
            ]);
            for u in users {
                let marker = if u.name == cfg.default_user { " *" } else { "" };
                table.add_row(vec![
                    u.id.to_string(),
                    format!("{}{}", u.name, marker),
                    u.created_at,
                ]);
            }
            print!("{}", table.render());
        }

        UserAction::Token { rotate } => {
            let (pool, user) = open_session(cli, cfg)?;
            if *rotate {
                let token = rotate_token(&pool.conn, user.id)?;
                ttlog(
                    &pool.conn,
                    "token",
                    &format!("user#{}", user.id),
                    "API token rotated",
                )?;
                success(format!("New token issued for '{}'", user.name));
                println!("🔑 Token : {}", token);
            } else {
                println!("🔑 Token : {}", user.token);
            }
        }
    }

    Ok(())
}
