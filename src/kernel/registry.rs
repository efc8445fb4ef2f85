//! Typed service registry and the kernel that owns it.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::ConnectorError;

struct ServiceEntry {
    type_id: TypeId,
    type_name: &'static str,
    service_id: Option<String>,
    instance: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("type_name", &self.type_name)
            .field("service_id", &self.service_id)
            .finish_non_exhaustive()
    }
}

/// Registrations collected before a [`ServiceProvider`] is built.
///
/// Services are registered under the abstraction they are looked up by,
/// usually a trait object such as `dyn TextGenerationService`. One instance may
/// be registered under several abstractions.
#[derive(Debug, Default)]
pub struct ServiceCollection {
    entries: Vec<ServiceEntry>,
}

impl ServiceCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` under the abstraction `T`.
    pub fn add_singleton<T>(&mut self, service: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.push::<T>(None, service)
    }

    /// Registers `service` under the abstraction `T` and the key `service_id`.
    pub fn add_keyed_singleton<T>(
        &mut self,
        service_id: impl Into<String>,
        service: Arc<T>,
    ) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.push::<T>(Some(service_id.into()), service)
    }

    fn push<T>(&mut self, service_id: Option<String>, service: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries.push(ServiceEntry {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            service_id,
            instance: Box::new(service),
        });
        self
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the registrations into a provider.
    pub fn build_service_provider(self) -> ServiceProvider {
        ServiceProvider {
            entries: Arc::new(self.entries),
        }
    }
}

/// Resolves registered services.
#[derive(Debug, Clone, Default)]
pub struct ServiceProvider {
    entries: Arc<Vec<ServiceEntry>>,
}

impl ServiceProvider {
    fn matching<'a, T>(&'a self, service_id: Option<&'a str>) -> impl Iterator<Item = Arc<T>> + 'a
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .iter()
            .filter(move |entry| entry.type_id == TypeId::of::<T>())
            .filter(move |entry| match service_id {
                Some(id) => entry.service_id.as_deref() == Some(id),
                None => true,
            })
            .filter_map(|entry| entry.instance.downcast_ref::<Arc<T>>().cloned())
    }

    /// Returns the most recently registered `T`, keyed or not.
    pub fn get_service<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.matching::<T>(None).last()
    }

    /// Returns the most recently registered `T` under `service_id`.
    pub fn get_keyed_service<T>(&self, service_id: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.matching::<T>(Some(service_id)).last()
    }

    /// Returns every registered `T` in registration order.
    pub fn get_services<T>(&self) -> Vec<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.matching::<T>(None).collect()
    }

    /// Like [`ServiceProvider::get_service`], failing when nothing is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ServiceNotRegistered`] if no `T` is registered.
    pub fn get_required_service<T>(&self) -> Result<Arc<T>, ConnectorError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get_service::<T>()
            .ok_or_else(|| ConnectorError::ServiceNotRegistered(type_name::<T>().to_string()))
    }

    /// Like [`ServiceProvider::get_keyed_service`], failing when nothing is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ServiceNotRegistered`] if no `T` is registered under `service_id`.
    pub fn get_required_keyed_service<T>(&self, service_id: &str) -> Result<Arc<T>, ConnectorError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get_keyed_service::<T>(service_id).ok_or_else(|| {
            ConnectorError::ServiceNotRegistered(format!("{} ({service_id})", type_name::<T>()))
        })
    }
}

/// Collects services and builds a [`Kernel`].
#[derive(Debug, Default)]
pub struct KernelBuilder {
    services: ServiceCollection,
}

impl KernelBuilder {
    /// Creates a builder with no services.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registrations made so far.
    pub fn services(&mut self) -> &mut ServiceCollection {
        &mut self.services
    }

    /// Builds the kernel.
    pub fn build(self) -> Kernel {
        Kernel {
            services: self.services.build_service_provider(),
        }
    }
}

/// Entry point holding the configured AI services.
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    services: ServiceProvider,
}

impl Kernel {
    /// Starts building a kernel.
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// The services registered on this kernel.
    pub fn services(&self) -> &ServiceProvider {
        &self.services
    }

    /// Resolves the most recently registered `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::ServiceNotRegistered`] if no `T` is registered.
    pub fn get_required_service<T>(&self) -> Result<Arc<T>, ConnectorError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.services.get_required_service::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: std::fmt::Debug + Send + Sync {
        fn greet(&self) -> String;
    }

    #[derive(Debug)]
    struct Hello(&'static str);

    impl Greeter for Hello {
        fn greet(&self) -> String {
            format!("hello {}", self.0)
        }
    }

    #[test]
    fn resolves_trait_objects_last_registration_wins() {
        let mut services = ServiceCollection::new();
        services
            .add_singleton::<dyn Greeter>(Arc::new(Hello("first")))
            .add_singleton::<dyn Greeter>(Arc::new(Hello("second")));

        let provider = services.build_service_provider();
        let greeter = provider.get_required_service::<dyn Greeter>().unwrap();
        assert_eq!(greeter.greet(), "hello second");
        assert_eq!(provider.get_services::<dyn Greeter>().len(), 2);
    }

    #[test]
    fn keyed_lookup_matches_service_id() {
        let mut services = ServiceCollection::new();
        services
            .add_keyed_singleton::<dyn Greeter>("a", Arc::new(Hello("a")))
            .add_keyed_singleton::<dyn Greeter>("b", Arc::new(Hello("b")));

        let provider = services.build_service_provider();
        assert_eq!(
            provider
                .get_required_keyed_service::<dyn Greeter>("a")
                .unwrap()
                .greet(),
            "hello a"
        );
        assert!(provider.get_keyed_service::<dyn Greeter>("c").is_none());
        assert_eq!(
            provider.get_required_service::<dyn Greeter>().unwrap().greet(),
            "hello b"
        );
    }

    #[test]
    fn missing_service_names_the_abstraction() {
        let kernel = Kernel::builder().build();
        let err = kernel.get_required_service::<dyn Greeter>().unwrap_err();
        match err {
            ConnectorError::ServiceNotRegistered(name) => assert!(name.contains("Greeter")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn same_instance_under_two_abstractions() {
        let hello = Arc::new(Hello("shared"));
        let mut builder = Kernel::builder();
        builder
            .services()
            .add_singleton::<dyn Greeter>(hello.clone())
            .add_singleton::<Hello>(hello.clone());
        let kernel = builder.build();

        let concrete = kernel.get_required_service::<Hello>().unwrap();
        assert!(Arc::ptr_eq(&concrete, &hello));
        assert_eq!(Arc::strong_count(&hello), 3);
    }
}
