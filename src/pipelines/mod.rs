/// Decision List word sense disambiguation
pub mod decision_list;
