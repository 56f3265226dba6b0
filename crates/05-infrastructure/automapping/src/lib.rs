//! # Entity AutoMapping
//!
//! 启动期的实体自动映射：
//!
//! - [`TypeScanner`] - 在类型目录中查找满足约束的具体实体类型
//! - [`ModelBinder`] - 把发现的实体类型挂到持久化模型上
//! - [`RepositoryRegistrar`] - 为发现的实体注册泛型仓储 `dyn Repository<E, K>`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use entity_automapping::{entity, register_entity_repositories, ModelDbContext};
//!
//! #[entity(key = i64)]
//! pub struct Customer {
//!     pub id: i64,
//! }
//!
//! let mut container = di_impl::DiContainerImpl::new();
//! container.register(ServiceDescriptor::instance(Arc::new(shop_context)))?;
//! register_entity_repositories::<ModelDbContext>(&mut container, Some("shop-domain"))?;
//! ```

// 让宏生成的 `::entity_automapping::` 路径在本 crate 内同样可用
extern crate self as entity_automapping;

pub mod binder;
pub mod context;
pub mod model;
pub mod options;
pub mod registrar;
pub mod repository;
pub mod scanner;

pub use binder::{attach_entities_to_model, attach_entity_types, attach_identity_entities, ModelBinder};
pub use context::ModelDbContext;
pub use model::EntityModel;
pub use options::AutoMappingOptions;
pub use registrar::{register_entity_repositories, RegistrationReport, RepositoryRegistrar};
pub use repository::{create_ef_repository, ef_repository_factory, EfRepository};
pub use scanner::{Constraint, TypeScanner};

pub use data_abstractions::{
    global_catalog, identity_contract, ContractDefinition, ContractId, ContractImpl, DbContext,
    Entity, EntityDescriptor, EntityType, IdentityContract, ModuleEntry, NotMapped,
    PersistenceModel, PrimaryKey, Repository, TypeCatalog,
};
pub use entity_macros::{entity, not_mapped};
pub use infrastructure_common::{MappingError, MappingResult, ModelError, ModuleInfo, TypeInfo};

#[doc(hidden)]
pub mod __private {
    pub use crate::repository::ef_repository_factory;
    pub use data_abstractions::{submit_descriptor, ContractId, ContractImpl, EntityDescriptor};
    pub use infrastructure_common::{ModuleInfo, TypeInfo};
}
