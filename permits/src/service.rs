use chrono::Duration;
use log::{info, warn};
use structures::{NewPermit, Permit};
use uuid::Uuid;
use vizhash::VizHashProvider;

use crate::{
    collaborators::{Clock, Person, PersonProvider, PhotoProvider, SystemClock},
    errors::PermitError,
    store::PermitStore,
};

pub const PERMIT_VALIDITY_HOURS: i64 = 12;
pub const PERMIT_IMAGE_SIZE: u32 = 400;

pub struct PermitService<S, P, F, C = SystemClock> {
    store: S,
    persons: P,
    photos: F,
    vizhash: VizHashProvider,
    clock: C,
}

impl<S, P, F> PermitService<S, P, F>
where
    S: PermitStore,
    P: PersonProvider,
    F: PhotoProvider,
{
    pub fn new(
        store: S,
        persons: P,
        photos: F,
        vizhash: VizHashProvider,
    ) -> Result<Self, PermitError> {
        Self::with_clock(store, persons, photos, vizhash, SystemClock)
    }
}

impl<S, P, F, C> PermitService<S, P, F, C>
where
    S: PermitStore,
    P: PersonProvider,
    F: PhotoProvider,
    C: Clock,
{
    /// Fails when `vizhash` has no secret, since no permit image could be
    /// rendered without one.
    pub fn with_clock(
        store: S,
        persons: P,
        photos: F,
        vizhash: VizHashProvider,
        clock: C,
    ) -> Result<Self, PermitError> {
        vizhash.config().secret()?;

        Ok(Self {
            store,
            persons,
            photos,
            vizhash,
            clock,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn current_person(&self) -> Result<Person, PermitError> {
        self.persons
            .current_person()
            .ok_or(PermitError::CurrentPersonNotFound)
    }

    /// Looks up a stored permit without attaching an image.
    pub fn find_permit(&self, identifier: &str) -> Result<Permit, PermitError> {
        self.store
            .find(identifier)
            .ok_or_else(|| PermitError::PermitNotFound(identifier.to_string()))
    }

    /// Fetches a permit and attaches a fresh visual hash with the owner's
    /// photo, or the placeholder when there is no photo.
    pub fn permit_by_id(&self, identifier: &str) -> Result<Permit, PermitError> {
        let permit = self.find_permit(identifier)?;

        self.with_image(permit)
    }

    fn with_image(&self, mut permit: Permit) -> Result<Permit, PermitError> {
        let input = self.vizhash.current_input(self.clock.now())?;
        let photo = self
            .persons
            .person_by_id(&permit.person_id)
            .and_then(|person| self.photos.photo_data(&person));

        let image = match photo {
            Some(photo) => self
                .vizhash
                .create_image_with_photo(&input, &photo, PERMIT_IMAGE_SIZE)?,
            None => {
                warn!(
                    "no photo for person {}, using placeholder for permit {}",
                    permit.person_id, permit.identifier
                );
                self.vizhash
                    .create_image_missing_photo(&input, PERMIT_IMAGE_SIZE)?
            }
        };
        permit.image = Some(image);

        Ok(permit)
    }

    /// The stored permit, if it belongs to the current person. No image is
    /// rendered.
    fn owned_permit(&self, identifier: &str) -> Result<Permit, PermitError> {
        let person = self.current_person()?;
        let permit = self.find_permit(identifier)?;

        if !permit.is_owned_by(&person.identifier) {
            return Err(PermitError::NotOwner(identifier.to_string()));
        }

        Ok(permit)
    }

    pub fn permits_for_current_person(&self) -> Result<Vec<Permit>, PermitError> {
        let person = self.current_person()?;

        Ok(self.store.find_by_person(&person.identifier))
    }

    pub fn expired_permits(&self) -> Vec<Permit> {
        self.store.find_valid_until_before(self.clock.now())
    }

    pub fn permit_by_id_for_current_person(
        &self,
        identifier: &str,
    ) -> Result<Permit, PermitError> {
        let permit = self.owned_permit(identifier)?;

        self.with_image(permit)
    }

    pub fn remove_permit_by_id_for_current_person(
        &self,
        identifier: &str,
    ) -> Result<(), PermitError> {
        let permit = self.owned_permit(identifier)?;

        self.remove_permit(&permit)
    }

    /// Removes the stored permit with the same identifier as `permit`.
    pub fn remove_permit(&self, permit: &Permit) -> Result<(), PermitError> {
        match self.store.remove(&permit.identifier) {
            Some(_) => {
                info!("removed permit {}", permit.identifier);
                Ok(())
            }
            None => Err(PermitError::PermitNotFound(permit.identifier.clone())),
        }
    }

    /// Issues a permit to the current person, valid from now for
    /// [`PERMIT_VALIDITY_HOURS`].
    pub fn create_permit_for_current_person(
        &self,
        new_permit: NewPermit,
    ) -> Result<Permit, PermitError> {
        let person = self.current_person()?;
        let now = self.clock.now();

        let permit = Permit {
            identifier: Uuid::new_v4().to_string(),
            person_id: person.identifier,
            valid_from: now,
            valid_until: now + Duration::hours(PERMIT_VALIDITY_HOURS),
            consent_assurance: new_permit.consent_assurance,
            manual_check_required: new_permit.manual_check_required,
            image: None,
        };

        self.store.insert(permit.clone());
        info!(
            "created permit {} for person {}",
            permit.identifier, permit.person_id
        );

        Ok(permit)
    }
}
