//! Centralized integration tests for di-impl crate
use di_abstractions::{
    ContainerBuilder, DiContainer, ServiceDescriptor, ServiceRegistry, ServiceRegistryExt,
    ServiceResolverExt,
};
use di_impl::{DiContainerBuilder, DiContainerImpl};
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试服务
trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Debug)]
struct TestService {
    name: String,
}

impl Greeter for TestService {
    fn greet(&self) -> String {
        format!("hello from {}", self.name)
    }
}

/// 依赖 Greeter 的服务
struct Consumer {
    greeter: Arc<dyn Greeter>,
}

struct Ping;
struct Pong;

#[test]
fn test_instance_registration_and_resolution() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    let greeter: Arc<dyn Greeter> = Arc::new(TestService {
        name: "test".to_string(),
    });
    container.register(ServiceDescriptor::instance(greeter))?;

    assert!(container.is_registered::<dyn Greeter>());
    assert!(container.can_resolve::<dyn Greeter>());
    let resolved = container.resolve::<dyn Greeter>()?;
    assert_eq!(resolved.greet(), "hello from test");
    Ok(())
}

#[test]
fn test_transient_creates_new_instances() -> anyhow::Result<()> {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);

    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::transient::<TestService, _>(move |_| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TestService {
            name: format!("transient-{}", n),
        }))
    }))?;

    let first = container.resolve::<TestService>()?;
    let second = container.resolve::<TestService>()?;
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(created.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_singleton_is_created_once() -> anyhow::Result<()> {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);

    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::singleton::<TestService, _>(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TestService {
            name: "singleton".to_string(),
        }))
    }))?;

    let first = container.resolve::<TestService>()?;
    let scope = container.create_scope();
    let from_scope = scope.resolve::<TestService>()?;

    assert!(Arc::ptr_eq(&first, &from_scope));
    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(container.stats().active_singletons, 1);
    Ok(())
}

#[test]
fn test_scoped_services_are_shared_within_scope() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::scoped::<TestService, _>(|_| {
        Ok(Arc::new(TestService {
            name: "scoped".to_string(),
        }))
    }))?;

    let root_result = container.resolve::<TestService>();
    assert!(matches!(root_result, Err(DependencyError::ScopeMismatch { .. })));

    let scope_a = container.create_scope();
    let scope_b = container.create_scope();
    let a1 = scope_a.resolve::<TestService>()?;
    let a2 = scope_a.resolve::<TestService>()?;
    let b1 = scope_b.resolve::<TestService>()?;

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b1));
    assert_ne!(scope_a.scope().id, scope_b.scope().id);
    Ok(())
}

#[test]
fn test_factories_resolve_dependencies() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    let greeter: Arc<dyn Greeter> = Arc::new(TestService {
        name: "dependency".to_string(),
    });
    container.register(ServiceDescriptor::instance(greeter))?;
    container.register(ServiceDescriptor::transient::<Consumer, _>(|resolver| {
        Ok(Arc::new(Consumer {
            greeter: resolver.resolve::<dyn Greeter>()?,
        }))
    }))?;

    let consumer = container.resolve::<Consumer>()?;
    assert_eq!(consumer.greeter.greet(), "hello from dependency");
    Ok(())
}

#[test]
fn test_register_if_not_keeps_first_registration() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    let first = ServiceDescriptor::instance(Arc::new(TestService {
        name: "first".to_string(),
    }));
    let second = ServiceDescriptor::instance(Arc::new(TestService {
        name: "second".to_string(),
    }));

    assert!(container.register_if_not(first)?);
    assert!(!container.register_if_not(second)?);
    assert_eq!(container.len(), 1);
    assert_eq!(container.resolve::<TestService>()?.name, "first");
    Ok(())
}

#[test]
fn test_register_overwrites_existing() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::instance(Arc::new(TestService {
        name: "old".to_string(),
    })))?;
    assert_eq!(container.resolve::<TestService>()?.name, "old");

    container.register(ServiceDescriptor::instance(Arc::new(TestService {
        name: "new".to_string(),
    })))?;
    assert_eq!(container.resolve::<TestService>()?.name, "new");
    assert_eq!(container.registrations().len(), 1);
    Ok(())
}

#[test]
fn test_unregistered_service() {
    let container = DiContainerImpl::new();
    let result = container.resolve::<TestService>();
    assert!(matches!(result, Err(DependencyError::ServiceNotRegistered { ref type_name }) if type_name == "TestService"));
    assert!(!container.can_resolve::<TestService>());

    let result = container.resolve::<dyn Greeter>();
    assert!(matches!(result, Err(DependencyError::ServiceNotRegistered { ref type_name }) if type_name == "dyn Greeter"));
}

#[test]
fn test_circular_dependency_is_detected() -> anyhow::Result<()> {
    let mut container = DiContainerImpl::new();
    container.register(ServiceDescriptor::transient::<Ping, _>(|resolver| {
        resolver.resolve::<Pong>()?;
        Ok(Arc::new(Ping))
    }))?;
    container.register(ServiceDescriptor::transient::<Pong, _>(|resolver| {
        resolver.resolve::<Ping>()?;
        Ok(Arc::new(Pong))
    }))?;

    match container.resolve::<Ping>() {
        Err(DependencyError::CircularDependency { dependency_chain }) => {
            assert_eq!(dependency_chain, "Ping -> Pong -> Ping");
        }
        other => panic!("expected circular dependency, got {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[test]
fn test_builder_registers_in_order() -> anyhow::Result<()> {
    let greeter: Arc<dyn Greeter> = Arc::new(TestService {
        name: "built".to_string(),
    });
    let container = DiContainerBuilder::new()
        .register(ServiceDescriptor::instance(greeter))
        .register(ServiceDescriptor::transient::<Consumer, _>(|resolver| {
            Ok(Arc::new(Consumer {
                greeter: resolver.resolve::<dyn Greeter>()?,
            }))
        }))
        .build()?;

    let services: Vec<String> = container
        .registrations()
        .into_iter()
        .map(|descriptor| descriptor.service.name)
        .collect();
    assert_eq!(services, vec!["dyn Greeter", "Consumer"]);

    let lifetimes: Vec<Lifetime> = container
        .registrations()
        .into_iter()
        .map(|descriptor| descriptor.lifetime)
        .collect();
    assert_eq!(lifetimes, vec![Lifetime::Singleton, Lifetime::Transient]);

    container.resolve::<Consumer>()?;
    assert_eq!(container.stats().registered_services, 2);
    Ok(())
}
