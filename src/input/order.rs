//! Code for reading sales order lines from CSV.
use super::*;
use crate::id::IDCollection;
use itertools::Itertools;
use serde::Deserialize;

const ORDERS_FILE_NAME: &str = "orders.csv";

/// Represents a single order line in the dataset
#[derive(PartialEq, Debug, Deserialize)]
struct OrderLineRaw {
    /// The material ordered
    material_id: String,
    /// Number of units ordered
    quantity: f64,
}

/// Read sales order lines from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the input CSV tables
/// * `material_ids` - All known material IDs
///
/// # Returns
///
/// Order lines in file order, with material IDs checked against the material master.
pub fn read_orders(data_dir: &Path, material_ids: &IndexSet<MaterialID>) -> Result<Vec<OrderLine>> {
    let file_path = data_dir.join(ORDERS_FILE_NAME);
    let iter = read_csv(&file_path)?;
    read_orders_from_iter(iter, material_ids).with_context(|| input_err_msg(&file_path))
}

/// Read order lines from an iterator.
///
/// # Arguments
///
/// * `iter` - An iterator of [`OrderLineRaw`]s
/// * `material_ids` - All known material IDs
fn read_orders_from_iter<I>(iter: I, material_ids: &IndexSet<MaterialID>) -> Result<Vec<OrderLine>>
where
    I: Iterator<Item = OrderLineRaw>,
{
    iter.map(|raw| {
        let material_id = material_ids.get_id_by_str(&raw.material_id)?;
        ensure!(
            raw.quantity >= 0.0 && raw.quantity.is_finite(),
            "Order for material {material_id}: quantity must be non-negative"
        );

        Ok(OrderLine {
            material_id,
            quantity: raw.quantity,
        })
    })
    .try_collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;

    fn material_ids() -> IndexSet<MaterialID> {
        ["M1".into(), "M2".into()].into_iter().collect()
    }

    fn raw(material_id: &str, quantity: f64) -> OrderLineRaw {
        OrderLineRaw {
            material_id: material_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_read_orders_from_iter() {
        let iter = [raw("M1", 10.0), raw("M2", 5.0), raw("M1", 2.0)].into_iter();
        let orders = read_orders_from_iter(iter, &material_ids()).unwrap();

        assert_eq!(
            orders,
            vec![
                OrderLine {
                    material_id: "M1".into(),
                    quantity: 10.0
                },
                OrderLine {
                    material_id: "M2".into(),
                    quantity: 5.0
                },
                OrderLine {
                    material_id: "M1".into(),
                    quantity: 2.0
                }
            ]
        );
    }

    #[test]
    fn test_read_orders_from_iter_unknown_material() {
        let iter = [raw("M3", 10.0)].into_iter();
        assert_error!(
            read_orders_from_iter(iter, &material_ids()),
            "Unknown ID M3 found"
        );
    }

    #[test]
    fn test_read_orders_from_iter_negative_quantity() {
        let iter = [raw("M1", -1.0)].into_iter();
        assert_error!(
            read_orders_from_iter(iter, &material_ids()),
            "Order for material M1: quantity must be non-negative"
        );
    }
}
