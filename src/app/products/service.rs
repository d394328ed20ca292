//! 产品目录业务服务
//!
//! 目录保存有序的产品列表、按 `code_value` 建立的索引以及 ID 计数器，
//! 三者由同一把互斥锁保护，每个操作在整个执行期间持有该锁。

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use super::model::{parse_expiration, NewProduct, Product};
use crate::config::IdSeed;
use crate::core::error::CatalogError;

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    by_code: HashMap<String, Product>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct Catalog {
    state: Mutex<CatalogState>,
}

impl Catalog {
    /// 使用加载得到的产品列表构建目录，加载数据不做唯一性检查
    pub fn from_products(products: Vec<Product>, seed: IdSeed) -> Self {
        let positional = products.last().map(|p| p.id).unwrap_or(0);
        let maximum = products.iter().map(|p| p.id).max().unwrap_or(0);
        let last_id = match seed {
            IdSeed::Last => {
                if positional < maximum {
                    warn!(
                        last_id = positional,
                        max_id = maximum,
                        "产品数据未按 id 升序排列，新建产品的 id 可能与已有产品重复"
                    );
                }
                positional
            }
            IdSeed::Max => maximum,
        };

        let by_code = products
            .iter()
            .map(|p| (p.code_value.clone(), p.clone()))
            .collect();

        info!(count = products.len(), last_id, "产品目录初始化完成");

        Self {
            state: Mutex::new(CatalogState {
                products,
                by_code,
                last_id,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        // 状态在每次修改前都已完成校验，中毒后的数据仍然一致
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_id(&self) -> i64 {
        self.lock().last_id
    }

    /// 按 id 查找产品，未找到时返回 `Ok(None)`
    pub fn find_by_id(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let id: i64 = id.parse().map_err(|_| CatalogError::InvalidArgument {
            name: "id",
            value: id.to_string(),
        })?;

        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    /// 返回价格严格大于阈值的产品，保持原有顺序
    pub fn search_by_price(&self, price: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let raw = match price {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(CatalogError::MissingArgument { name: "price" }),
        };
        let threshold: f64 = raw.parse().map_err(|_| CatalogError::InvalidArgument {
            name: "price",
            value: raw.to_string(),
        })?;

        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.price > threshold)
            .cloned()
            .collect())
    }

    /// 校验并创建产品
    ///
    /// 校验顺序：必填字段、`code_value` 唯一性、过期日期格式。
    /// 任一校验失败时目录状态保持不变。
    pub fn create(&self, candidate: NewProduct) -> Result<Product, CatalogError> {
        let missing = candidate.missing_fields();
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields { fields: missing });
        }

        let mut state = self.lock();

        if state.by_code.contains_key(&candidate.code_value) {
            return Err(CatalogError::DuplicateKey {
                field: "code_value",
                value: candidate.code_value,
            });
        }

        if parse_expiration(&candidate.expiration).is_none() {
            return Err(CatalogError::InvalidFormat {
                field: "expiration",
                value: candidate.expiration,
            });
        }

        let id = state
            .last_id
            .checked_add(1)
            .ok_or(CatalogError::IdExhausted {
                last_id: state.last_id,
            })?;
        state.last_id = id;
        let product = candidate.into_product(id);
        state.products.push(product.clone());
        state
            .by_code
            .insert(product.code_value.clone(), product.clone());

        info!(id = product.id, code_value = %product.code_value, "产品创建成功");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn product(id: i64, code: &str, price: f64) -> Product {
        Product {
            id,
            name: format!("产品{}", id),
            quantity: 10,
            code_value: code.to_string(),
            is_published: true,
            expiration: "15/06/2031".to_string(),
            price,
        }
    }

    fn candidate(code: &str, price: f64) -> NewProduct {
        NewProduct {
            name: "X".to_string(),
            quantity: 5,
            code_value: code.to_string(),
            expiration: "01/01/2030".to_string(),
            price,
        }
    }

    fn seeded() -> Catalog {
        Catalog::from_products(vec![product(1, "A1", 10.0)], IdSeed::Last)
    }

    #[test]
    fn test_last_id_is_seeded_from_last_element() {
        let catalog = Catalog::from_products(
            vec![product(3, "A", 1.0), product(9, "B", 1.0), product(5, "C", 1.0)],
            IdSeed::Last,
        );
        assert_eq!(catalog.last_id(), 5);
    }

    #[test]
    fn test_last_id_can_be_seeded_from_maximum() {
        let catalog = Catalog::from_products(
            vec![product(3, "A", 1.0), product(9, "B", 1.0), product(5, "C", 1.0)],
            IdSeed::Max,
        );
        assert_eq!(catalog.last_id(), 9);
    }

    #[test]
    fn test_empty_catalog_starts_at_zero() {
        let catalog = Catalog::from_products(Vec::new(), IdSeed::Last);
        assert!(catalog.is_empty());
        assert_eq!(catalog.create(candidate("Z9", 1.0)).unwrap().id, 1);
    }

    #[test]
    fn test_create_then_lookup_and_search() {
        let catalog = seeded();

        let created = catalog.create(candidate("B2", 20.0)).unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(created.code_value, "B2");
        assert!(!created.is_published);

        assert_eq!(catalog.find_by_id("2").unwrap(), Some(created.clone()));

        let found = catalog.search_by_price(Some("15")).unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = seeded();
        let first = catalog.find_by_id("1").unwrap();
        assert_eq!(first, catalog.find_by_id("1").unwrap());
        assert_eq!(first.map(|p| p.code_value), Some("A1".to_string()));
        assert_eq!(catalog.find_by_id("42").unwrap(), None);
    }

    #[test]
    fn test_find_by_id_rejects_non_integer() {
        let catalog = seeded();
        assert_eq!(
            catalog.find_by_id("abc"),
            Err(CatalogError::InvalidArgument {
                name: "id",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_search_by_price_is_strict_and_ordered() {
        let catalog = Catalog::from_products(
            vec![
                product(1, "A", 30.0),
                product(2, "B", 10.0),
                product(3, "C", 10.5),
                product(4, "D", 25.0),
            ],
            IdSeed::Last,
        );
        let ids: Vec<i64> = catalog
            .search_by_price(Some("10"))
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert!(catalog.search_by_price(Some("100")).unwrap().is_empty());
    }

    #[test]
    fn test_search_by_price_argument_errors() {
        let catalog = seeded();
        assert_eq!(
            catalog.search_by_price(None),
            Err(CatalogError::MissingArgument { name: "price" })
        );
        assert_eq!(
            catalog.search_by_price(Some("")),
            Err(CatalogError::MissingArgument { name: "price" })
        );
        assert!(matches!(
            catalog.search_by_price(Some("cheap")),
            Err(CatalogError::InvalidArgument { name: "price", .. })
        ));
    }

    #[test]
    fn test_duplicate_code_value_is_rejected() {
        let catalog = seeded();
        let err = catalog.create(candidate("A1", 5.0)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateKey {
                field: "code_value",
                value: "A1".to_string()
            }
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.last_id(), 1);
    }

    #[test]
    fn test_created_code_value_becomes_unique() {
        let catalog = seeded();
        catalog.create(candidate("B2", 5.0)).unwrap();
        assert!(matches!(
            catalog.create(candidate("B2", 6.0)),
            Err(CatalogError::DuplicateKey { .. })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let catalog = seeded();
        let mut incomplete = candidate("C3", 0.0);
        incomplete.name.clear();
        assert_eq!(
            catalog.create(incomplete),
            Err(CatalogError::MissingFields {
                fields: vec!["name", "price"]
            })
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_fields_checked_before_duplicate() {
        let catalog = seeded();
        let mut incomplete = candidate("A1", 5.0);
        incomplete.quantity = 0;
        assert!(matches!(
            catalog.create(incomplete),
            Err(CatalogError::MissingFields { .. })
        ));
    }

    #[test]
    fn test_invalid_expiration_is_rejected() {
        let catalog = seeded();
        let mut bad_date = candidate("D4", 5.0);
        bad_date.expiration = "2030-01-01".to_string();
        assert_eq!(
            catalog.create(bad_date),
            Err(CatalogError::InvalidFormat {
                field: "expiration",
                value: "2030-01-01".to_string()
            })
        );
        assert_eq!(catalog.last_id(), 1);
        assert!(catalog.create(candidate("D4", 5.0)).is_ok());
    }

    #[test]
    fn test_create_fails_when_ids_are_exhausted() {
        let catalog = Catalog::from_products(vec![product(i64::MAX, "A1", 10.0)], IdSeed::Last);
        assert_eq!(
            catalog.create(candidate("B2", 20.0)),
            Err(CatalogError::IdExhausted { last_id: i64::MAX })
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.last_id(), i64::MAX);
        assert!(catalog.find_by_id(&i64::MAX.to_string()).unwrap().is_some());
    }

    #[test]
    fn test_loaded_duplicate_codes_are_trusted() {
        let catalog = Catalog::from_products(
            vec![product(1, "A1", 10.0), product(2, "A1", 20.0)],
            IdSeed::Last,
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.last_id(), 2);
        assert_eq!(
            catalog.create(candidate("A1", 5.0)),
            Err(CatalogError::DuplicateKey {
                field: "code_value",
                value: "A1".to_string()
            })
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_concurrent_creates_assign_unique_ids() {
        let catalog = Arc::new(seeded());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || {
                    for i in 0..25 {
                        catalog
                            .create(candidate(&format!("T{}-{}", t, i), 1.0))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<i64> = catalog.list().iter().map(|p| p.id).collect();
        let expected: Vec<i64> = (1..=201).collect();
        assert_eq!(ids, expected);
        assert_eq!(catalog.last_id(), 201);
    }
}
