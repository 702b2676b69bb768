use crate::{
    domain::common::{StaffdeskConfig, services::Service},
    infrastructure::resource::HttpResourceRepository,
};

pub type StaffdeskService = Service<HttpResourceRepository>;

pub async fn create_service(config: StaffdeskConfig) -> Result<StaffdeskService, anyhow::Error> {
    let resource_repository = HttpResourceRepository::new(&config.backend)?;

    Ok(Service::new(resource_repository))
}
