use estatebook_core::model::{Address, Area, Email, Phone, Price, Region, Tag};
use estatebook_core::{
    execute, AutoConfirm, Client, Command, CommandContext, CommandResult, ConfirmationGate,
    EngineConfig, Name, Result, Role, Store, VisibleClients,
};

#[allow(dead_code)]
pub fn name(s: &str) -> Name {
    Name::new(s).unwrap()
}

/// Build a client with a phone and email derived from its name
#[allow(dead_code)]
pub fn client(role: Role, display: &str, phone: &str, tags: &[&str]) -> Client {
    let local: String = display
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    Client::new(
        role,
        name(display),
        Phone::new(phone).unwrap(),
        Email::new(format!("{}@example.com", local)).unwrap(),
        tags.iter().map(|t| Tag::new(*t).unwrap()).collect(),
    )
}

#[allow(dead_code)]
pub fn alice() -> Client {
    client(Role::Buyer, "Alice Pauline", "94351253", &["friends"])
}

#[allow(dead_code)]
pub fn benson() -> Client {
    client(Role::Buyer, "Benson Meier", "98765432", &["owesMoney", "friends"])
}

#[allow(dead_code)]
pub fn carl() -> Client {
    client(Role::Seller, "Carl Kurz", "95352563", &[])
}

#[allow(dead_code)]
pub fn daniel() -> Client {
    client(Role::Seller, "Daniel Meier", "87652533", &["friends"])
}

#[allow(dead_code)]
pub fn tan() -> Client {
    client(Role::Buyer, "Tan Wen Xuan", "91031282", &[])
}

#[allow(dead_code)]
pub fn add_listing_cmd(listing: &str, seller: &str, buyers: &[&str]) -> Command {
    Command::AddListing {
        name: name(listing),
        price: Price::new(650_000).unwrap(),
        area: Area::new(100).unwrap(),
        address: Address::new(format!("{} Street 1", listing)).unwrap(),
        region: Region::Central,
        seller: seller.to_string(),
        buyers: buyers.iter().map(|b| b.to_string()).collect(),
    }
}

/// Run a command with every client visible and default config
#[allow(dead_code)]
pub fn run(store: &mut Store, cmd: Command, gate: &dyn ConfirmationGate) -> Result<CommandResult> {
    let visible = VisibleClients::all(store);
    run_visible(store, cmd, gate, &visible)
}

#[allow(dead_code)]
pub fn run_visible(
    store: &mut Store,
    cmd: Command,
    gate: &dyn ConfirmationGate,
    visible: &VisibleClients,
) -> Result<CommandResult> {
    let config = EngineConfig::default();
    let ctx = CommandContext::new(visible, gate, &config);
    execute(store, cmd, &ctx)
}

/// Two buyers, two sellers and three listings:
///
/// - "Pasir Ris Flat": Carl, buyers Alice and Benson
/// - "Bishan Condo": Carl, buyer Alice
/// - "Tampines Terrace": Daniel, no buyers
#[allow(dead_code)]
pub fn typical_store() -> Store {
    let mut store = Store::new();
    for cmd in [
        Command::AddBuyer(alice()),
        Command::AddBuyer(benson()),
        Command::AddSeller(carl()),
        Command::AddSeller(daniel()),
        add_listing_cmd("Pasir Ris Flat", "Carl Kurz", &["Alice Pauline", "Benson Meier"]),
        add_listing_cmd("Bishan Condo", "Carl Kurz", &["Alice Pauline"]),
        add_listing_cmd("Tampines Terrace", "Daniel Meier", &[]),
    ] {
        run(&mut store, cmd, &AutoConfirm).unwrap();
    }
    store
}

#[allow(dead_code)]
pub fn listing_names(store: &Store) -> Vec<String> {
    store
        .listings()
        .iter()
        .map(|l| l.name().to_string())
        .collect()
}
