//! Accounts and offers shared by the use case tests

use accounts::Identity;
use accounts::InMemoryAccountsRepository;
use accounts::domain::entity::Account;
use accounts::domain::repository::AccountRepository;
use accounts::domain::value_object::{Email, Siret, Username};
use accounts::domain::Profile;
use platform::password::ClearTextPassword;

use crate::application::form::OfferForm;

pub fn account(username: &str) -> Account {
    let hash = ClearTextPassword::new("Blue-Harbor-Lantern-19")
        .hash(None)
        .unwrap();
    Account::new(
        Username::new(username).unwrap(),
        hash,
        Email::new(&format!("{username}@example.com")).unwrap(),
        "",
        "",
    )
}

pub async fn company(repo: &InMemoryAccountsRepository, username: &str) -> Identity {
    let account = account(username);
    let profile = Profile::company(
        account.account_id,
        "1 rue de la Paix, Paris",
        None,
        Siret::new("12345678901234").unwrap(),
    );
    repo.create_with_profile(&account, &profile).await.unwrap();
    Identity::authenticated(account.account_id, false, false)
}

pub async fn applicant(repo: &InMemoryAccountsRepository, username: &str) -> Identity {
    let account = account(username);
    let profile = Profile::applicant(account.account_id, "2 rue Oberkampf, Paris", None, None);
    repo.create_with_profile(&account, &profile).await.unwrap();
    Identity::authenticated(account.account_id, false, false)
}

pub fn offer_form(title: &str) -> OfferForm {
    OfferForm {
        title: title.to_string(),
        description: format!("{title} wanted"),
        salary: "50000".to_string(),
        skills_input: "Python, Django".to_string(),
        active: None,
    }
}
