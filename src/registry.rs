//! Static table descriptors driving route and SQL generation.

use std::collections::HashMap;

/// One registered table: name, writable columns, and primary-key column.
/// `writable_fields` order fixes the parameter order of generated inserts.
/// The primary key is auto-generated by the database and is never writable.
#[derive(Clone, Copy, Debug)]
pub struct TableDescriptor {
    pub name: &'static str,
    pub writable_fields: &'static [&'static str],
    pub id_field: &'static str,
}

impl TableDescriptor {
    /// URL path segment under /api for this table.
    pub fn path_segment(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    pub fn is_writable(&self, field: &str) -> bool {
        self.writable_fields.contains(&field)
    }
}

/// The blood bank schema as served by this API.
pub const TABLES: &[TableDescriptor] = &[
    TableDescriptor {
        name: "Donor",
        writable_fields: &[
            "Name",
            "DOB",
            "ContactNumber",
            "Address",
            "BloodType",
            "LastDonationDate",
            "MedicalHistory",
        ],
        id_field: "DonorID",
    },
    TableDescriptor {
        name: "Patient",
        writable_fields: &[
            "Name",
            "DOB",
            "Gender",
            "ContactInformation",
            "Address",
            "MedicalHistory",
            "BloodType",
        ],
        id_field: "PatientID",
    },
    TableDescriptor {
        name: "Hospital",
        writable_fields: &["HospitalName", "Address", "ContactInformation"],
        id_field: "HospitalID",
    },
    TableDescriptor {
        name: "Employee",
        writable_fields: &["Name", "ContactInformation", "JobTitle", "Department"],
        id_field: "EmployeeID",
    },
    TableDescriptor {
        name: "BloodInventory",
        writable_fields: &["BloodBankID", "BloodID", "Quantity", "ExpirationDate"],
        id_field: "InventoryID",
    },
    TableDescriptor {
        name: "BloodRequest",
        writable_fields: &[
            "PatientID",
            "HospitalID",
            "BloodType",
            "Quantity",
            "RequestDate",
            "Status",
        ],
        id_field: "RequestID",
    },
    TableDescriptor {
        name: "BloodDonation",
        writable_fields: &["DonorID", "BloodBankID", "BloodID", "DonationDate"],
        id_field: "DonationID",
    },
    TableDescriptor {
        name: "BloodTransfusion",
        writable_fields: &["PatientID", "BloodID", "TransfusionDate", "EmployeeID"],
        id_field: "TransfusionID",
    },
    TableDescriptor {
        name: "Blood",
        writable_fields: &[
            "BloodType",
            "DonationDate",
            "ExpirationDate",
            "Quantity",
            "Status",
            "Component",
        ],
        id_field: "BloodID",
    },
    TableDescriptor {
        name: "BloodBank",
        writable_fields: &["BankName", "Address", "ContactInformation", "OperationalHours"],
        id_field: "BloodBankID",
    },
];

/// Descriptor lookup by URL path segment. Built once at startup, read-only.
#[derive(Clone, Debug)]
pub struct TableRegistry {
    by_segment: HashMap<String, &'static TableDescriptor>,
}

impl TableRegistry {
    /// Registry over the built-in blood bank tables.
    pub fn builtin() -> Self {
        Self::from_tables(TABLES)
    }

    pub fn from_tables(tables: &'static [TableDescriptor]) -> Self {
        let by_segment = tables.iter().map(|t| (t.path_segment(), t)).collect();
        TableRegistry { by_segment }
    }

    pub fn descriptor(&self, segment: &str) -> Option<&'static TableDescriptor> {
        self.by_segment.get(segment).copied()
    }

    pub fn tables(&self) -> impl Iterator<Item = &'static TableDescriptor> + '_ {
        self.by_segment.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registers_all_ten_tables() {
        assert_eq!(TABLES.len(), 10);
        let registry = TableRegistry::builtin();
        assert_eq!(registry.tables().count(), 10);
    }

    #[test]
    fn path_segments_are_lowercase_and_unique() {
        let mut seen = HashSet::new();
        for t in TABLES {
            let seg = t.path_segment();
            assert_eq!(seg, seg.to_ascii_lowercase());
            assert!(seen.insert(seg), "duplicate segment for {}", t.name);
        }
    }

    #[test]
    fn id_field_is_never_writable() {
        for t in TABLES {
            assert!(!t.is_writable(t.id_field), "{} exposes its id field", t.name);
        }
    }

    #[test]
    fn writable_fields_are_unique_per_table() {
        for t in TABLES {
            let unique: HashSet<_> = t.writable_fields.iter().collect();
            assert_eq!(unique.len(), t.writable_fields.len(), "{}", t.name);
        }
    }

    #[test]
    fn lookup_by_segment() {
        let registry = TableRegistry::builtin();
        let donor = registry.descriptor("donor").unwrap();
        assert_eq!(donor.name, "Donor");
        assert_eq!(donor.id_field, "DonorID");
        assert_eq!(donor.writable_fields[0], "Name");
        assert!(registry.descriptor("bloodinventory").is_some());
        assert!(registry.descriptor("Donor").is_none());
        assert!(registry.descriptor("unknown").is_none());
    }
}
