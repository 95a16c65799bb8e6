use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    repository::UserRepository,
    user::{NationalId, User, parse_birth_date},
};

use super::ServiceError;

pub struct UserService<'r, U> {
    users: &'r mut U,
}

impl<'r, U> UserService<'r, U>
where
    U: UserRepository,
{
    pub fn new(users: &'r mut U) -> Self {
        Self { users }
    }

    /// Validates the national id and birth date, then stores the user.
    /// Uniqueness of the national id is left to the repository.
    pub fn register(
        &mut self,
        name: &str,
        birth_date: &str,
        national_id: &str,
        address: &str,
    ) -> Result<Rc<User>, ServiceError> {
        let national_id = NationalId::parse(national_id.trim())?;
        let birth_date = parse_birth_date(birth_date.trim())?;
        let user = User::new(
            name.trim().to_string(),
            birth_date,
            national_id,
            address.trim().to_string(),
        );
        match self.users.add(user) {
            Ok(user) => {
                info!(national_id = %user.national_id(), "user registered");
                Ok(user)
            }
            Err(err) => {
                debug!(%err, "user registration rejected");
                Err(err.into())
            }
        }
    }

    pub fn find_user(&self, national_id: &str) -> Option<Rc<User>> {
        let national_id = NationalId::parse(national_id.trim()).ok()?;
        self.users.find_by_national_id(&national_id)
    }

    /// All registered users, ordered by national id.
    pub fn list_users(&self) -> Vec<Rc<User>> {
        let mut users = self.users.users();
        users.sort_by(|a, b| a.national_id().cmp(b.national_id()));
        users
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        repository::{RepositoryError, in_memory_repository::InMemoryUserRepository},
        user::InputError,
    };

    #[test]
    fn register_user() {
        let mut repo = InMemoryUserRepository::default();
        let mut service = UserService::new(&mut repo);
        let user = service
            .register(
                " Ana ",
                "01-01-1990",
                "11144477735",
                "Rua A, 1 - Centro - Recife/PE",
            )
            .unwrap();
        assert_eq!(user.name(), "Ana");
        assert_eq!(
            user.birth_date(),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
        assert_eq!(user.national_id().as_str(), "11144477735");
        assert_eq!(user.address(), "Rua A, 1 - Centro - Recife/PE");

        let found = service.find_user("11144477735").unwrap();
        assert!(Rc::ptr_eq(&found, &user));
        assert!(service.find_user("52998224725").is_none());
        assert!(service.find_user("not an id").is_none());
    }

    #[test]
    fn list_users_by_national_id() {
        let mut repo = InMemoryUserRepository::default();
        let mut service = UserService::new(&mut repo);
        for (name, national_id) in [
            ("Bia", "52998224725"),
            ("Caio", "12345678909"),
            ("Ana", "11144477735"),
        ] {
            service
                .register(name, "01-01-1990", national_id, "Rua A")
                .unwrap();
        }
        let names: Vec<_> = service
            .list_users()
            .iter()
            .map(|user| user.name().to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Caio", "Bia"]);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut repo = InMemoryUserRepository::default();
        let mut service = UserService::new(&mut repo);

        let err = service
            .register("Ana", "01-01-1990", "11111111111", "Rua A")
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::InvalidInput(InputError::InvalidNationalId("11111111111".to_string()))
        );

        let err = service
            .register("Ana", "1990-01-01", "11144477735", "Rua A")
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::InvalidInput(InputError::InvalidBirthDate("1990-01-01".to_string()))
        );
        assert!(service.list_users().is_empty());
    }

    #[test]
    fn duplicate_national_id_is_rejected() {
        let mut repo = InMemoryUserRepository::default();
        let mut service = UserService::new(&mut repo);
        service
            .register("Ana", "01-01-1990", "11144477735", "Rua A")
            .unwrap();
        let err = service
            .register("Bia", "02-02-1992", "11144477735", "Rua B")
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::RepositoryErr(RepositoryError::DuplicateKey { .. })
        ));
        assert_eq!(service.list_users().len(), 1);
        assert_eq!(service.find_user("11144477735").unwrap().name(), "Ana");
    }
}
