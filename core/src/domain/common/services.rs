use crate::domain::listing::ports::ResourceRepository;

/// Application service; every domain service trait is implemented on it.
#[derive(Clone)]
pub struct Service<RR>
where
    RR: ResourceRepository,
{
    pub(crate) resource_repository: RR,
}

impl<RR> Service<RR>
where
    RR: ResourceRepository,
{
    pub fn new(resource_repository: RR) -> Self {
        Self {
            resource_repository,
        }
    }
}
