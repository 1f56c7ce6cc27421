use crate::app::BookFinder;
use crate::error::BookFinderError;

pub fn handle_register(
    app: &BookFinder,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), BookFinderError> {
    let account = app.register(username, email, password)?;
    println!("Welcome, {}! You are now signed in.", account.username);
    println!("Account ID: {}", account.id);
    Ok(())
}

pub fn handle_login(app: &BookFinder, email: &str, password: &str) -> Result<(), BookFinderError> {
    let account = app.login(email, password)?;
    println!("Signed in as {} <{}>", account.username, account.email);
    Ok(())
}

pub fn handle_logout(app: &BookFinder) -> Result<(), BookFinderError> {
    app.logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn handle_whoami(app: &BookFinder) -> Result<(), BookFinderError> {
    match app.current_account()? {
        Some(account) => println!("{} <{}>\tID: {}", account.username, account.email, account.id),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub fn handle_users(app: &BookFinder) -> Result<(), BookFinderError> {
    let accounts = app.accounts().accounts()?;
    if accounts.is_empty() {
        println!("No accounts registered.");
        return Ok(());
    }
    for account in &accounts {
        println!("{}\t{} <{}>", account.id, account.username, account.email);
    }
    Ok(())
}
