//! Shell commands. Each handler validates its arguments, dispatches through the
//! store, and prints the result.

use chrono::Datelike;

use crate::cli::core::{
    parse_amount, parse_date, parse_entry_type, short_id, CommandError, CommandResult,
    ParsedArgs, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::services::{SummaryService, TransactionFilter};
use crate::currency::{format_date, month_year_long};
use crate::domain::{
    palette_colors, Category, Displayable, EntryType, SavingsGoal, Transaction, DEFAULT_COLOR,
};
use crate::utils::build_info;

const BAR_WIDTH: usize = 20;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in [
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build information", "version", cmd_version),
        CommandEntry::new(
            "dashboard",
            "Summary of totals, budgets, goals, and recent activity",
            "dashboard",
            cmd_dashboard,
        )
        .with_aliases(&["dash"]),
        CommandEntry::new(
            "transactions",
            "List transactions grouped by month",
            "transactions [income|expense] [--search <text>]",
            cmd_transactions,
        )
        .with_aliases(&["txns"]),
        CommandEntry::new(
            "add-transaction",
            "Record an income or expense",
            "add-transaction <income|expense> <amount> <category> [--date YYYY-MM-DD] [--note <text>]",
            cmd_add_transaction,
        ),
        CommandEntry::new(
            "remove-transaction",
            "Delete a transaction by id prefix",
            "remove-transaction <id>",
            cmd_remove_transaction,
        ),
        CommandEntry::new(
            "categories",
            "List categories with totals and budgets",
            "categories [income|expense]",
            cmd_categories,
        ),
        CommandEntry::new(
            "add-category",
            "Create a category",
            "add-category <income|expense> <name> [budget] [--color <hex>]",
            cmd_add_category,
        ),
        CommandEntry::new(
            "remove-category",
            "Delete a category that no transaction uses",
            "remove-category <name> [income|expense]",
            cmd_remove_category,
        ),
        CommandEntry::new("goals", "List savings goals", "goals", cmd_goals),
        CommandEntry::new(
            "add-goal",
            "Create a savings goal",
            "add-goal <name> <target> <YYYY-MM-DD> [--current <amount>] [--color <hex>]",
            cmd_add_goal,
        ),
        CommandEntry::new(
            "contribute",
            "Add money to a savings goal",
            "contribute <goal> <amount>",
            cmd_contribute,
        ),
        CommandEntry::new(
            "remove-goal",
            "Delete a savings goal",
            "remove-goal <goal>",
            cmd_remove_goal,
        ),
        CommandEntry::new(
            "trends",
            "Monthly income, expenses, and savings",
            "trends [months]",
            cmd_trends,
        ),
        CommandEntry::new(
            "config",
            "Show or change saved preferences",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ] {
        registry.register(entry);
    }
}

/// Next chart color after `used` existing entries.
fn next_palette_color(used: usize) -> String {
    palette_colors(used + 1)
        .pop()
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(entry) = context.registry.resolve(name) else {
            context.suggest_command(name);
            return Ok(());
        };
        for line in entry.help_lines() {
            output::info(line);
        }
        return Ok(());
    }

    output::section("Commands");
    for entry in context.registry.entries() {
        output::info(entry.summary_line());
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => context.show_config(),
        [action] if action.eq_ignore_ascii_case("show") => context.show_config(),
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            context.set_config_value(key, &value.join(" "))?;
            output::success(format!("Saved {}.", key.to_ascii_lowercase()));
        }
        _ => return Err(context.usage("config")),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.store.dashboard(context.config.dashboard_options());

    output::section(format!("Dashboard: {}", snapshot.month_label));
    output::info(format!(
        "Month progress {} {:.0}%",
        output::progress_bar(snapshot.month_progress, BAR_WIDTH),
        snapshot.month_progress
    ));
    output::info(format!(
        "Income {}  Expenses {}  Balance {}  Savings rate {}%",
        context.money(snapshot.totals.income),
        context.money(snapshot.totals.expense),
        context.money(snapshot.totals.balance),
        snapshot.totals.savings_rate
    ));

    output::section("Expenses by category");
    if snapshot.expense_breakdown.is_empty() {
        output::info("No expenses recorded.");
    }
    for slice in &snapshot.expense_breakdown {
        output::info(format!("  {:<16} {:>14}", slice.name, context.money(slice.value)));
    }

    output::section("Budgets");
    if snapshot.budgets.is_empty() {
        output::info("No budgeted categories.");
    }
    for budget in &snapshot.budgets {
        let figure = format!("{:>3}%", budget.display_percent);
        output::info(format!(
            "  {:<16} {} {} {} of {} ({} left)",
            budget.name,
            output::progress_bar(f64::from(budget.display_percent), BAR_WIDTH),
            output::status_label(budget.status, figure),
            context.money(budget.spent),
            context.money(budget.budget),
            context.money(budget.remaining)
        ));
    }

    output::section("Savings goals");
    if snapshot.goals.is_empty() {
        output::info("No savings goals.");
    }
    for goal in &snapshot.goals {
        output::info(format!(
            "  {:<16} {} {:>3.0}% {} of {}, {} days left",
            goal.name,
            output::progress_bar(goal.percent, BAR_WIDTH),
            goal.percent,
            context.money(goal.current),
            context.money(goal.target),
            goal.days_left
        ));
    }

    output::section("Recent transactions");
    if snapshot.recent.is_empty() {
        output::info("No transactions yet.");
    }
    for txn in &snapshot.recent {
        print_transaction(context, txn);
    }
    Ok(())
}

fn print_transaction(context: &ShellContext, txn: &Transaction) {
    let amount = context.money(txn.signed_amount());
    output::info(format!(
        "  {}  {}  {:<14} {:>14}  {}",
        short_id(txn.id),
        format_date(txn.date),
        context.category_label(txn.category_id),
        amount,
        txn.description
    ));
}

fn cmd_transactions(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["search"])?;
    let mut filter = match parsed.positional.as_slice() {
        [] => TransactionFilter::default(),
        [kind] => TransactionFilter::of_type(parse_entry_type(kind)?),
        _ => return Err(context.usage("transactions")),
    };
    if let Some(term) = parsed.flag("search") {
        filter = filter.with_search(term);
    }

    let matching = context.store.transactions(&filter);
    if matching.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    for group in SummaryService::group_by_month(&matching) {
        output::section(&group.label);
        for txn in group.transactions {
            print_transaction(context, txn);
        }
    }
    Ok(())
}

fn cmd_add_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["date", "note"])?;
    let [kind, amount, category] = parsed.positional.as_slice() else {
        return Err(context.usage("add-transaction"));
    };
    let entry_type = parse_entry_type(kind)?;
    let amount = parse_amount(amount, "amount")?;
    let category_id = context.find_category(category, Some(entry_type))?.id;
    let date = match parsed.flag("date") {
        Some(raw) => parse_date(raw)?,
        None => context.store.today(),
    };

    let mut txn = Transaction::new(entry_type, amount, category_id, date);
    if let Some(note) = parsed.flag("note") {
        txn = txn.with_description(note);
    }
    let id = context.store.add_transaction(txn)?;
    output::success(format!(
        "Recorded {} of {} ({}).",
        entry_type.to_string().to_lowercase(),
        context.money(amount),
        short_id(id)
    ));
    Ok(())
}

fn cmd_remove_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(context.usage("remove-transaction"));
    };
    let txn = context.find_transaction(prefix)?;
    let (id, label) = (txn.id, txn.display_label());
    context.store.remove_transaction(id)?;
    output::success(format!("Removed transaction {} ({label}).", short_id(id)));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match args {
        [] => vec![EntryType::Income, EntryType::Expense],
        [kind] => vec![parse_entry_type(kind)?],
        _ => return Err(context.usage("categories")),
    };

    for kind in kinds {
        output::section(format!("{kind} categories"));
        let rows = context.store.category_activity(kind);
        if rows.is_empty() {
            output::info("None.");
        }
        for row in rows {
            let mut line = format!("  {:<16} {:>14}", row.name, context.money(row.total));
            if let Some(remaining) = row.remaining {
                line.push_str(&format!(
                    "  budget {}  left {}",
                    context.money(row.budget),
                    context.money(remaining)
                ));
                if row.is_over_budget() {
                    line.push_str("  (over budget)");
                }
            }
            output::info(line);
        }
    }
    Ok(())
}

fn cmd_add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["color"])?;
    let (kind, name, budget) = match parsed.positional.as_slice() {
        [kind, name] => (*kind, *name, None),
        [kind, name, budget] => (*kind, *name, Some(*budget)),
        _ => return Err(context.usage("add-category")),
    };
    let entry_type = parse_entry_type(kind)?;
    let kind_label = entry_type.to_string().to_lowercase();
    if context
        .store
        .ledger()
        .category_by_name(name, Some(entry_type))
        .is_some()
    {
        return Err(CommandError::InvalidArguments(format!(
            "A {kind_label} category named `{name}` already exists."
        )));
    }

    let mut category = Category::new(name, entry_type);
    if let Some(raw) = budget {
        category = category.with_budget(parse_amount(raw, "budget")?);
    }
    category = match parsed.flag("color") {
        Some(color) => category.with_color(color),
        None => {
            let used = context.store.ledger().categories.len();
            category.with_color(next_palette_color(used))
        }
    };
    context.store.add_category(category)?;
    output::success(format!("Added {kind_label} category `{name}`."));
    Ok(())
}

fn cmd_remove_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, entry_type) = match args {
        [name] => (*name, None),
        [name, kind] => (*name, Some(parse_entry_type(kind)?)),
        _ => return Err(context.usage("remove-category")),
    };
    let category = context.find_category(name, entry_type)?;
    let (id, label) = (category.id, category.display_label());
    context.store.remove_category(id)?;
    output::success(format!("Removed category `{label}`."));
    Ok(())
}

fn cmd_goals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Savings goals");
    let goals = context.store.goal_progress();
    if goals.is_empty() {
        output::info("No savings goals.");
    }
    for goal in goals {
        output::info(format!(
            "  {:<16} {} {:>3.0}%  {} of {}  {} to go, {} days left",
            goal.name,
            output::progress_bar(goal.percent, BAR_WIDTH),
            goal.percent,
            context.money(goal.current),
            context.money(goal.target),
            context.money(goal.remaining.max(0.0)),
            goal.days_left
        ));
    }
    Ok(())
}

fn cmd_add_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["current", "color"])?;
    let [name, target, date] = parsed.positional.as_slice() else {
        return Err(context.usage("add-goal"));
    };
    let target = parse_amount(target, "target")?;
    let date = parse_date(date)?;

    let mut goal = SavingsGoal::new(*name, target, date);
    if let Some(raw) = parsed.flag("current") {
        goal = goal.with_current(parse_amount(raw, "current amount")?);
    }
    goal = match parsed.flag("color") {
        Some(color) => goal.with_color(color),
        None => goal.with_color(next_palette_color(context.store.ledger().goals.len())),
    };
    context.store.add_savings_goal(goal)?;
    output::success(format!(
        "Added goal `{name}` targeting {} by {}.",
        context.money(target),
        format_date(date)
    ));
    Ok(())
}

fn cmd_contribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, amount] = args else {
        return Err(context.usage("contribute"));
    };
    let amount = parse_amount(amount, "amount")?;
    let goal = context.find_goal(name)?;
    let (id, label, target) = (goal.id, goal.name.clone(), goal.target_amount);

    let current = context.store.contribute_to_goal(id, amount)?;
    let percent = (current * 100.0 / target).min(100.0);
    output::success(format!(
        "`{label}` now holds {} ({percent:.0}%).",
        context.money(current)
    ));
    Ok(())
}

fn cmd_remove_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(context.usage("remove-goal"));
    };
    let goal = context.find_goal(name)?;
    let (id, label) = (goal.id, goal.display_label());
    context.store.remove_savings_goal(id)?;
    output::success(format!("Removed goal `{label}`."));
    Ok(())
}

fn cmd_trends(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = match args {
        [] => context.config.trend_months,
        [raw] => match raw.parse::<usize>() {
            Ok(count) if count > 0 => count,
            _ => {
                return Err(CommandError::InvalidArguments(format!(
                    "`{raw}` is not a positive month count."
                )))
            }
        },
        _ => return Err(context.usage("trends")),
    };

    let today = context.store.today();
    output::section(format!(
        "Last {months} months to {}",
        month_year_long(today.year(), today.month())
    ));
    output::info(format!(
        "  {:<10} {:>14} {:>14} {:>14}",
        "Month", "Income", "Expenses", "Savings"
    ));
    for month in context.store.monthly_series(months) {
        output::info(format!(
            "  {:<10} {:>14} {:>14} {:>14}",
            month.label,
            context.money(month.income),
            context.money(month.expense),
            context.money(month.savings)
        ));
    }
    Ok(())
}
